#![forbid(unsafe_code)]

use core::fmt;

pub const LEVEL1_REASON_CODES: [&str; 2] = [
    "level1_stride_contract_violation",
    "level1_span_contract_violation",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level1Error {
    StrideContractViolation(&'static str),
    SpanContractViolation(&'static str),
}

impl Level1Error {
    #[must_use]
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::StrideContractViolation(_) => "level1_stride_contract_violation",
            Self::SpanContractViolation(_) => "level1_span_contract_violation",
        }
    }
}

impl fmt::Display for Level1Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StrideContractViolation(msg) => write!(f, "{msg}"),
            Self::SpanContractViolation(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Level1Error {}

/// Rotation produced by `srotg`/`drotg`: `r` is the rotated magnitude,
/// `c`/`s` the cosine/sine pair, and `z` the reconstruction scalar of the
/// reference BLAS convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GivensRotation<T> {
    pub r: T,
    pub z: T,
    pub c: T,
    pub s: T,
}

fn required_span(n: usize, inc: usize) -> usize {
    if n == 0 { 0 } else { (n - 1) * inc + 1 }
}

fn validate_x(n: usize, len: usize, incx: usize) -> Result<(), Level1Error> {
    if incx == 0 {
        return Err(Level1Error::StrideContractViolation(
            "x stride must be non-zero",
        ));
    }
    if len < required_span(n, incx) {
        return Err(Level1Error::SpanContractViolation(
            "x does not cover the strided span",
        ));
    }
    Ok(())
}

fn validate_y(n: usize, len: usize, incy: usize) -> Result<(), Level1Error> {
    if incy == 0 {
        return Err(Level1Error::StrideContractViolation(
            "y stride must be non-zero",
        ));
    }
    if len < required_span(n, incy) {
        return Err(Level1Error::SpanContractViolation(
            "y does not cover the strided span",
        ));
    }
    Ok(())
}

macro_rules! level1_real_impl {
    ($ty:ty, $dot:ident, $nrm2:ident, $asum:ident, $iamax:ident, $copy:ident,
     $swap:ident, $axpy:ident, $scal:ident, $rotg:ident) => {
        pub fn $dot(
            n: usize,
            x: &[$ty],
            incx: usize,
            y: &[$ty],
            incy: usize,
        ) -> Result<$ty, Level1Error> {
            validate_x(n, x.len(), incx)?;
            validate_y(n, y.len(), incy)?;
            let mut acc: $ty = 0.0;
            for i in 0..n {
                acc += x[i * incx] * y[i * incy];
            }
            Ok(acc)
        }

        pub fn $nrm2(n: usize, x: &[$ty], incx: usize) -> Result<$ty, Level1Error> {
            validate_x(n, x.len(), incx)?;
            // Reference BLAS scaled accumulation; squaring x[i] directly
            // would overflow for inputs near the type's max.
            let mut scale: $ty = 0.0;
            let mut ssq: $ty = 1.0;
            for i in 0..n {
                let xi = x[i * incx];
                if xi != 0.0 {
                    let absxi = xi.abs();
                    if scale < absxi {
                        let ratio = scale / absxi;
                        ssq = 1.0 + ssq * ratio * ratio;
                        scale = absxi;
                    } else {
                        let ratio = absxi / scale;
                        ssq += ratio * ratio;
                    }
                }
            }
            Ok(scale * ssq.sqrt())
        }

        pub fn $asum(n: usize, x: &[$ty], incx: usize) -> Result<$ty, Level1Error> {
            validate_x(n, x.len(), incx)?;
            let mut acc: $ty = 0.0;
            for i in 0..n {
                acc += x[i * incx].abs();
            }
            Ok(acc)
        }

        /// Zero-based logical index of the first element of maximal
        /// magnitude; `0` when `n == 0`.
        pub fn $iamax(n: usize, x: &[$ty], incx: usize) -> Result<usize, Level1Error> {
            validate_x(n, x.len(), incx)?;
            if n == 0 {
                return Ok(0);
            }
            let mut best = 0usize;
            let mut best_mag = x[0].abs();
            for i in 1..n {
                let mag = x[i * incx].abs();
                if mag > best_mag {
                    best = i;
                    best_mag = mag;
                }
            }
            Ok(best)
        }

        pub fn $copy(
            n: usize,
            x: &[$ty],
            incx: usize,
            y: &mut [$ty],
            incy: usize,
        ) -> Result<(), Level1Error> {
            validate_x(n, x.len(), incx)?;
            validate_y(n, y.len(), incy)?;
            for i in 0..n {
                y[i * incy] = x[i * incx];
            }
            Ok(())
        }

        pub fn $swap(
            n: usize,
            x: &mut [$ty],
            incx: usize,
            y: &mut [$ty],
            incy: usize,
        ) -> Result<(), Level1Error> {
            validate_x(n, x.len(), incx)?;
            validate_y(n, y.len(), incy)?;
            for i in 0..n {
                let tmp = x[i * incx];
                x[i * incx] = y[i * incy];
                y[i * incy] = tmp;
            }
            Ok(())
        }

        pub fn $axpy(
            n: usize,
            alpha: $ty,
            x: &[$ty],
            incx: usize,
            y: &mut [$ty],
            incy: usize,
        ) -> Result<(), Level1Error> {
            validate_x(n, x.len(), incx)?;
            validate_y(n, y.len(), incy)?;
            for i in 0..n {
                y[i * incy] += alpha * x[i * incx];
            }
            Ok(())
        }

        pub fn $scal(
            n: usize,
            alpha: $ty,
            x: &mut [$ty],
            incx: usize,
        ) -> Result<(), Level1Error> {
            validate_x(n, x.len(), incx)?;
            for i in 0..n {
                x[i * incx] *= alpha;
            }
            Ok(())
        }

        pub fn $rotg(a: $ty, b: $ty) -> GivensRotation<$ty> {
            let anorm = a.abs();
            let bnorm = b.abs();
            let roe = if anorm > bnorm { a } else { b };
            let scale = anorm + bnorm;
            if scale == 0.0 {
                return GivensRotation {
                    r: 0.0,
                    z: 0.0,
                    c: 1.0,
                    s: 0.0,
                };
            }
            let ra = a / scale;
            let rb = b / scale;
            let mut r = scale * (ra * ra + rb * rb).sqrt();
            if roe < 0.0 {
                r = -r;
            }
            let c = a / r;
            let s = b / r;
            let z = if anorm > bnorm {
                s
            } else if c != 0.0 {
                1.0 / c
            } else {
                1.0
            };
            GivensRotation { r, z, c, s }
        }
    };
}

level1_real_impl!(f32, sdot, snrm2, sasum, isamax, scopy, sswap, saxpy, sscal, srotg);
level1_real_impl!(f64, ddot, dnrm2, dasum, idamax, dcopy, dswap, daxpy, dscal, drotg);
