//! Closed-form polynomial root finding for the torus intersection.
//!
//! Missing (complex) roots are reported as NaN, so callers filter with
//! comparisons that are false for NaN.

use std::f64::NAN;

/// Largest real root of `x^3 + b x^2 + c x + d = 0`.
pub fn solve_cubic(b: f64, c: f64, d: f64) -> f64 {
	// depressed form: u^3 + p u + q = 0 with x = u - b/3
	let p = c - (1.0 / 3.0) * b * b;
	let q = (1.0 / 27.0) * (2.0 * b * b * b - 9.0 * b * c) + d;

	// -108 times the discriminant of the depressed cubic
	let disc = (1.0 / 27.0) * p * p * p + 0.25 * q * q;

	let u = if disc > 0.0 {
		// one real root (Cardano)
		let s = disc.sqrt();
		(-0.5 * q + s).cbrt() + (-0.5 * q - s).cbrt()
	} else {
		// three real roots; the principal angle gives the largest one
		let phi = (-disc).sqrt().atan2(-0.5 * q);
		2.0 * (-p / 3.0).max(0.0).sqrt() * (phi / 3.0).cos()
	};

	polish(u - (1.0 / 3.0) * b, |x| {
		(((x + b) * x + c) * x + d, (3.0 * x + 2.0 * b) * x + c)
	})
}

/// Real roots of `x^4 + b x^3 + c x^2 + d x + e = 0`, NaN for the missing ones.
/// Roots are in no particular order.
pub fn solve_quartic(b: f64, c: f64, d: f64, e: f64) -> [f64; 4] {
	let b2 = b * b;
	let alpha = c - (3.0 / 8.0) * b2;
	let beta = (1.0 / 8.0) * b * b2 - 0.5 * b * c + d;
	let gamma = -(3.0 / 256.0) * b2 * b2 + (1.0 / 16.0) * c * b2 - 0.25 * b * d + e;

	let mut roots = solve_quartic_depressed(alpha, beta, gamma);
	for root in roots.iter_mut() {
		*root = polish(*root - 0.25 * b, |x| {
			let f = (((x + b) * x + c) * x + d) * x + e;
			let df = ((4.0 * x + 3.0 * b) * x + 2.0 * c) * x + d;
			(f, df)
		});
	}
	roots
}

/// Real roots of `y^4 + c y^2 + d y + e = 0` (Ferrari).
fn solve_quartic_depressed(c: f64, d: f64, e: f64) -> [f64; 4] {
	let mut roots = [NAN; 4];

	if d.abs() <= 1e-12 * (1.0 + c.abs() + e.abs()) {
		// biquadratic: w^2 + c w + e = 0 with w = y^2
		let disc = c * c - 4.0 * e;
		if disc < 0.0 {
			return roots;
		}
		let s = disc.sqrt();
		let w1 = 0.5 * (-c + s);
		let w2 = 0.5 * (-c - s);
		if w1 >= 0.0 {
			roots[0] = w1.sqrt();
			roots[1] = -roots[0];
		}
		if w2 >= 0.0 {
			roots[2] = w2.sqrt();
			roots[3] = -roots[2];
		}
		return roots;
	}

	// The resolvent has a negative constant term, so its largest root is
	// positive in exact arithmetic. Rounding can still break that.
	let y = solve_cubic(2.0 * c, c * c - 4.0 * e, -d * d);
	if !(y > 0.0) {
		return roots;
	}
	let z = y.sqrt();

	let tmp = -0.5 * d / z - 0.5 * c - 0.25 * y;
	if tmp >= 0.0 {
		let s = tmp.sqrt();
		roots[0] = 0.5 * z + s;
		roots[1] = 0.5 * z - s;
	}
	let tmp = 0.5 * d / z - 0.5 * c - 0.25 * y;
	if tmp >= 0.0 {
		let s = tmp.sqrt();
		roots[2] = -0.5 * z + s;
		roots[3] = -0.5 * z - s;
	}
	roots
}

/// A couple of Newton steps, kept only while they reduce the residual.
/// `f` returns the polynomial value and its derivative.
fn polish<F>(x: f64, f: F) -> f64
	where F: Fn(f64) -> (f64, f64)
{
	if !x.is_finite() {
		return x;
	}
	let mut x = x;
	let (mut fx, mut dfx) = f(x);
	for _ in 0..2 {
		if fx == 0.0 || dfx == 0.0 {
			break;
		}
		let next = x - fx / dfx;
		let (fn_next, dfn_next) = f(next);
		if !(fn_next.abs() < fx.abs()) {
			break;
		}
		x = next;
		fx = fn_next;
		dfx = dfn_next;
	}
	x
}
