use std::fs;
use std::io::{BufWriter, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use log::{debug, info};

use crate::error::{Error, Result};
use crate::io::InputStream;
use crate::math::linear_rec::{consecutive_terms, Recurrence};
use crate::math::ntt::{Ntt, DEFAULT_NAIVE_THRESHOLD};
use crate::math::num_mod::{Field, Mod998244353, RuntimeModulus, DEFAULT_MODULUS};
use crate::math::poly::PolyOp;

/// Consecutive terms of a linear recurrence modulo a prime.
///
/// Reads `d k m`, then `d` initial terms, then `d` coefficients, and prints
/// `a_k, .., a_{k+m-1}`.
#[derive(Parser, Debug, Clone)]
#[clap(version)]
pub struct Args {
    /// Read the problem from a file instead of stdin
    #[clap(short, long)]
    pub input: Option<PathBuf>,

    /// NTT-friendly prime modulus below 2^31
    #[clap(long, default_value_t = DEFAULT_MODULUS)]
    pub modulus: u32,

    /// Operand length at or below which convolution is done naively
    #[clap(long, default_value_t = DEFAULT_NAIVE_THRESHOLD)]
    pub naive_threshold: usize,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            input: None,
            modulus: DEFAULT_MODULUS,
            naive_threshold: DEFAULT_NAIVE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub recurrence: Recurrence,
    pub k: u64,
    pub m: usize,
}

fn residues(
    input: &mut &[u8],
    n: usize,
    what: &'static str,
    modulus: u32,
) -> Result<Vec<u32>> {
    (0..n)
        .map(|_| {
            let value: u64 = input.value(what)?;
            if value >= modulus as u64 {
                return Err(Error::ValueOutOfRange {
                    what,
                    value,
                    modulus,
                });
            }
            Ok(value as u32)
        })
        .collect()
}

impl Problem {
    pub fn parse(mut input: &[u8], modulus: u32) -> Result<Self> {
        let d: u32 = input.value("d")?;
        let k: u64 = input.value("k")?;
        let m: u32 = input.value("m")?;
        let init = residues(&mut input, d as usize, "initial term", modulus)?;
        let coeffs = residues(&mut input, d as usize, "coefficient", modulus)?;
        Ok(Self {
            recurrence: Recurrence::new(init, coeffs)?,
            k,
            m: m as usize,
        })
    }
}

fn write_terms<W: Write>(out: &mut W, terms: &[u32]) -> Result<()> {
    for (i, t) in terms.iter().enumerate() {
        if i > 0 {
            write!(out, " ")?;
        }
        write!(out, "{}", t)?;
    }
    writeln!(out)?;
    Ok(())
}

fn run_with<M: Field, W: Write>(op: M, args: &Args, input: &[u8], out: &mut W) -> Result<()> {
    let ntt = Ntt::new(op)?.with_naive_threshold(args.naive_threshold);
    let problem = Problem::parse(input, ntt.op().modulus())?;
    info!(
        "d = {}, k = {}, m = {}, modulus = {}",
        problem.recurrence.order(),
        problem.k,
        problem.m,
        ntt.op().modulus()
    );

    let ops = PolyOp::new(&ntt);
    let terms = consecutive_terms(&ops, &problem.recurrence, problem.k, problem.m)?;
    write_terms(out, &terms)
}

/// Solves the problem in `input` and writes the answer line to `out`.
pub fn run<W: Write>(args: &Args, input: &[u8], out: &mut W) -> Result<()> {
    if args.modulus == DEFAULT_MODULUS {
        run_with(Mod998244353::new(), args, input, out)
    } else {
        debug!("using runtime modulus {}", args.modulus);
        run_with(RuntimeModulus::new(args.modulus)?, args, input, out)
    }
}

/// Contents of `--input` if given, stdin otherwise.
pub fn read_input(args: &Args) -> Result<Vec<u8>> {
    let buf = match &args.input {
        Some(path) => fs::read(path)?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };
    debug!("read {} bytes of input", buf.len());
    Ok(buf)
}

pub fn main(args: &Args) -> Result<()> {
    let buf = read_input(args)?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    run(args, &buf, &mut out)?;
    out.flush()?;
    Ok(())
}
