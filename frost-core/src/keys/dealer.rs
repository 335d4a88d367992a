//! Trusted-dealer keygen: splits a single secret key into a set of Feldman-verifiable
//! [`SecretShare`]s, and reconstructs a secret from a large enough set of shares.

use std::collections::{BTreeMap, BTreeSet};

use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::{
    identifier::Identifier,
    keys::{CoefficientCommitment, PublicKeyPackage, SecretShare, SigningShare, VerifyingShare,
        VerifiableSecretSharingCommitment},
    polynomial::{evaluate_polynomial, generate_coefficients},
    Ciphersuite, Error, Field, Group, SigningKey,
};

/// Generates a fresh random key and splits it among `max_signers` participants such that
/// any `min_signers` of them can later reconstruct a signature (never the key itself).
///
/// `identifiers` must contain exactly `max_signers` distinct, non-zero identifiers — one
/// per participant.
pub fn generate_with_dealer<C: Ciphersuite, R: RngCore + CryptoRng>(
    max_signers: u16,
    min_signers: u16,
    identifiers: BTreeSet<Identifier<C>>,
    rng: &mut R,
) -> Result<(BTreeMap<Identifier<C>, SecretShare<C>>, PublicKeyPackage<C>), Error<C>> {
    let signing_key = SigningKey::new(rng);
    split(&signing_key, max_signers, min_signers, identifiers, rng)
}

/// Splits a given `signing_key` into shares, per §4.3/§4.5.
///
/// Exposed separately from [`generate_with_dealer`] so tests (and callers migrating an
/// existing key into threshold form) can supply a specific secret rather than a freshly
/// generated one.
pub fn split<C: Ciphersuite, R: RngCore + CryptoRng>(
    signing_key: &SigningKey<C>,
    max_signers: u16,
    min_signers: u16,
    identifiers: BTreeSet<Identifier<C>>,
    rng: &mut R,
) -> Result<(BTreeMap<Identifier<C>, SecretShare<C>>, PublicKeyPackage<C>), Error<C>> {
    if min_signers < 2 {
        return Err(Error::InvalidMinSigners);
    }
    if max_signers < 2 {
        return Err(Error::InvalidMaxSigners);
    }
    if min_signers > max_signers {
        return Err(Error::InvalidMinMaxSigners);
    }
    if identifiers.len() != max_signers as usize {
        return Err(Error::IncorrectNumberOfIdentifiers);
    }

    let mut raw_coefficients = generate_coefficients::<C, R>((min_signers - 1) as usize, rng);
    raw_coefficients.insert(0, signing_key.scalar);
    let coefficients = Zeroizing::new(raw_coefficients);

    let commitment = VerifiableSecretSharingCommitment(
        coefficients
            .iter()
            .map(|c| CoefficientCommitment(<C::Group>::generator() * *c))
            .collect(),
    );
    let verifying_key = commitment.verifying_key();

    let mut secret_shares = BTreeMap::new();
    let mut verifying_shares = BTreeMap::new();

    for identifier in identifiers {
        let signing_share = SigningShare::new(evaluate_polynomial::<C>(identifier, &coefficients));
        let verifying_share = VerifyingShare::new(<C::Group>::generator() * signing_share.scalar);

        verifying_shares.insert(identifier, verifying_share);
        secret_shares.insert(
            identifier,
            SecretShare {
                identifier,
                signing_share,
                commitment: commitment.clone(),
            },
        );
    }

    Ok((
        secret_shares,
        PublicKeyPackage {
            verifying_shares,
            verifying_key,
            min_signers,
        },
    ))
}

/// Reconstructs the signing key from a large enough set of [`SecretShare`]s, via Lagrange
/// interpolation at `x = 0`.
///
/// This defeats the entire point of threshold signing if used outside of testing: a
/// genuine FROST deployment never reconstructs the key, only a signature. Exposed for
/// test vectors and for migrating away from threshold custody back to a single key.
pub fn reconstruct<C: Ciphersuite>(shares: &[SecretShare<C>]) -> Result<SigningKey<C>, Error<C>> {
    let first = shares.first().ok_or(Error::IncorrectNumberOfShares)?;
    let min_signers = first.commitment.0.len();
    if shares.len() < min_signers {
        return Err(Error::IncorrectNumberOfShares);
    }

    let identifiers: BTreeSet<Identifier<C>> = shares.iter().map(|s| s.identifier).collect();
    if identifiers.len() != shares.len() {
        return Err(Error::IncorrectNumberOfShares);
    }

    let scalar = shares.iter().fold(
        <<C::Group as Group>::Field>::zero(),
        |acc, share| {
            let lambda_i =
                crate::polynomial::compute_lagrange_coefficient(&identifiers, share.identifier);
            acc + share.signing_share.scalar * lambda_i
        },
    );

    Ok(SigningKey { scalar })
}
