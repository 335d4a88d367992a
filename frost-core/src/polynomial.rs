//! Polynomial operations used by Shamir/Feldman secret sharing and FROST's
//! Lagrange-coefficient-based share combination.

use std::collections::BTreeSet;

use rand_core::{CryptoRng, RngCore};

use crate::{Ciphersuite, Field, Group, Identifier, Scalar};

/// Generates `size` uniformly random scalars to serve as a polynomial's coefficients.
///
/// Only `pub(crate)` by default; built with `internals`, it is exported so that other
/// threshold protocols built on the same group/field traits (e.g. rerandomized FROST
/// variants) can reuse it without duplicating the sampling logic, at the cost of losing
/// semver coverage on its signature.
#[cfg_attr(feature = "internals", visibility::make(pub))]
pub(crate) fn generate_coefficients<C: Ciphersuite, R: RngCore + CryptoRng>(
    size: usize,
    rng: &mut R,
) -> Vec<Scalar<C>> {
    (0..size)
        .map(|_| <<C::Group as Group>::Field>::random(rng))
        .collect()
}

/// Evaluates a polynomial, given by `coefficients` (lowest-degree first, so
/// `coefficients[0]` is the constant term) at `identifier`, using Horner's rule.
#[cfg_attr(feature = "internals", visibility::make(pub))]
pub(crate) fn evaluate_polynomial<C: Ciphersuite>(
    identifier: Identifier<C>,
    coefficients: &[Scalar<C>],
) -> Scalar<C> {
    let x = identifier.to_scalar();

    coefficients
        .iter()
        .rev()
        .fold(<<C::Group as Group>::Field>::zero(), |acc, coeff| {
            acc * x + *coeff
        })
}

/// Computes the Lagrange coefficient `lambda_i` for `signer_id`, evaluated at `x = 0`,
/// over the full `identifiers` set:
///
/// `lambda_i = prod_{j != i} x_j / (x_j - x_i)`
///
/// This is the weight by which `signer_id`'s share must be scaled so that summing every
/// signer's scaled share reconstructs `p(0)`.
///
/// # Panics
///
/// Panics if `signer_id` is not a member of `identifiers`; this is a caller-violated
/// invariant (every caller in this crate derives `identifiers` from a set that already
/// contains `signer_id`), not a recoverable runtime condition.
pub fn compute_lagrange_coefficient<C: Ciphersuite>(
    identifiers: &BTreeSet<Identifier<C>>,
    signer_id: Identifier<C>,
) -> Scalar<C> {
    assert!(
        identifiers.contains(&signer_id),
        "signer_id must be a member of identifiers"
    );

    let x_i = signer_id.to_scalar();
    let one = <<C::Group as Group>::Field>::one();

    let (num, den) = identifiers.iter().filter(|&&id| id != signer_id).fold(
        (one, one),
        |(num, den), id| {
            let x_j = id.to_scalar();
            (num * x_j, den * (x_j - x_i))
        },
    );

    num * <<C::Group as Group>::Field>::invert(&den)
        .expect("den is nonzero because identifiers are pairwise distinct")
}
