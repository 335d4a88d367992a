//! Error types returned by this crate's operations.

use core::fmt::Debug;

use thiserror::Error;

use crate::{Ciphersuite, Identifier};

/// A field-level error, raised by a [`crate::Field`] implementation.
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum FieldError {
    /// The encoding of a scalar was malformed.
    #[error("malformed scalar encoding")]
    MalformedScalar,
    /// The scalar is the additive identity, where one was not expected (e.g. asked to invert it).
    #[error("invalid zero scalar")]
    InvalidZeroScalar,
}

/// A group-level error, raised by a [`crate::Group`] implementation.
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum GroupError {
    /// The encoding of a group element was malformed.
    #[error("malformed element encoding")]
    MalformedElement,
    /// The encoded group element is the identity, where one was not expected.
    #[error("invalid identity element")]
    InvalidIdentity,
}

/// An error raised by the FROST crate operations in this crate.
#[derive(Error, Debug)]
pub enum Error<C: Ciphersuite> {
    /// min_signers must be at least 2.
    #[error("min_signers must be at least 2")]
    InvalidMinSigners,
    /// max_signers must be at least 2.
    #[error("max_signers must be at least 2")]
    InvalidMaxSigners,
    /// min_signers must be less than or equal to max_signers.
    #[error("min_signers must be less than or equal to max_signers")]
    InvalidMinMaxSigners,
    /// Wrong number of coefficients supplied to a polynomial constructor.
    #[error("invalid number of coefficients supplied")]
    InvalidCoefficients,
    /// The lengths of the identifier set and value set being interpolated differ.
    #[error("the number of identifiers and values supplied for interpolation must match")]
    IncorrectNumberOfIdentifiers,
    /// Too few shares were supplied to reconstruct the secret.
    #[error("not enough shares to reconstruct the secret")]
    IncorrectNumberOfShares,
    /// A [`crate::keys::SecretShare`] failed to verify against its commitment.
    #[error("the secret share is not consistent with its commitment")]
    InvalidSecretShare,
    /// An identifier is missing from a map where it was expected.
    #[error("unknown identifier")]
    UnknownIdentifier,
    /// Too few signing commitments or signature shares were supplied.
    #[error("incorrect number of commitments")]
    IncorrectNumberOfCommitments,
    /// The signer's own commitment is missing from the signing package.
    #[error("signer's commitment is missing from the signing package")]
    MissingCommitment,
    /// The signer's nonces do not match the commitment on record for its identifier.
    #[error("signer's nonces do not match its own commitment in the signing package")]
    IncorrectCommitment,
    /// A signature share failed to verify during aggregation.
    #[error("signature share from identifier {culprit:?} is invalid")]
    InvalidSignatureShare {
        /// The identifier of the signer whose share failed to verify.
        culprit: Identifier<C>,
    },
    /// The aggregated signature is invalid.
    #[error("the aggregated signature is invalid")]
    InvalidSignature,
    /// An identifier failed to deserialize.
    #[error("malformed identifier")]
    MalformedIdentifier,
    /// A signing key failed to deserialize.
    #[error("malformed signing key")]
    MalformedSigningKey,
    /// A verifying key failed to deserialize.
    #[error("malformed verifying key")]
    MalformedVerifyingKey,
    /// A signature failed to deserialize, or had the wrong length.
    #[error("malformed signature")]
    MalformedSignature,
    /// A lower-level field error.
    #[error(transparent)]
    FieldError(#[from] FieldError),
    /// A lower-level group error.
    #[error(transparent)]
    GroupError(#[from] GroupError),
}
