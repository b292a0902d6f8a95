use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("modulus {0} is out of range (expected 1 <= m < 2^31)")]
    ModulusOutOfRange(u64),

    #[error("{value} has no inverse modulo {modulus}")]
    NotInvertible { value: u32, modulus: u32 },

    #[error("modulus {modulus} cannot be used for NTT: {reason}")]
    NotNttFriendly { modulus: u32, reason: &'static str },

    #[error("transform length {0} is not a power of two")]
    NotPowerOfTwo(usize),

    #[error("transform length {len} exceeds 2^{max_log2} supported by modulus {modulus}")]
    TransformTooLong {
        len: usize,
        max_log2: u32,
        modulus: u32,
    },

    #[error("division by the zero polynomial")]
    DivisionByZero,

    #[error("power series with a zero constant term has no inverse")]
    ZeroConstantTerm,

    #[error("denominator must be non-empty with nonzero constant and leading terms")]
    InvalidDenominator,

    /// Numerator degree must stay strictly below the denominator degree.
    #[error("numerator of length {numer} is not shorter than denominator of length {denom}")]
    ImproperFraction { numer: usize, denom: usize },

    #[error("recurrence has {terms} initial terms but {coeffs} coefficients")]
    LengthMismatch { terms: usize, coeffs: usize },

    #[error("unexpected end of input while reading {0}")]
    UnexpectedEof(&'static str),

    #[error("invalid token {token:?} for {what}")]
    InvalidToken { token: String, what: &'static str },

    #[error("{what} = {value} is not below the modulus {modulus}")]
    ValueOutOfRange {
        what: &'static str,
        value: u64,
        modulus: u32,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
