//! Message transport for interactive proofs.
//!
//! The protocol needs three moves in a fixed order:
//!
//! ```text
//! Prover                      Verifier
//!   |  ---- Commitment t ---->   |
//!   |  <---- Challenge c -----   |
//!   |  ---- Response s ------>   |
//! ```
//!
//! [`Channel`] abstracts the carrier. [`StreamChannel`] frames each message as
//! `tag:u8 || u32be(len) || magnitude` over any async byte stream.

use std::future::Future;

use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, trace};

use super::prover::Prover;
use super::verifier::VerifierSession;
use crate::{Commitment, Error, GroupParameters, Proof, Response, Result, Statement};

/// Largest payload accepted in a single frame.
const MAX_FRAME_PAYLOAD: usize = 4096;

const TAG_COMMITMENT: u8 = 1;
const TAG_CHALLENGE: u8 = 2;
const TAG_RESPONSE: u8 = 3;

/// One protocol move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    /// First move, prover to verifier.
    Commitment(Commitment),
    /// Second move, verifier to prover.
    Challenge(BigUint),
    /// Third move, prover to verifier.
    Response(Response),
}

impl Message {
    /// Short name of the message kind, used in errors and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Commitment(_) => "commitment",
            Self::Challenge(_) => "challenge",
            Self::Response(_) => "response",
        }
    }

    fn tag(&self) -> u8 {
        match self {
            Self::Commitment(_) => TAG_COMMITMENT,
            Self::Challenge(_) => TAG_CHALLENGE,
            Self::Response(_) => TAG_RESPONSE,
        }
    }

    fn value(&self) -> &BigUint {
        match self {
            Self::Commitment(commitment) => commitment.t(),
            Self::Challenge(challenge) => challenge,
            Self::Response(response) => response.s(),
        }
    }
}

/// Bidirectional, ordered message carrier between prover and verifier.
pub trait Channel: Send {
    /// Sends one message.
    fn send(&mut self, message: Message) -> impl Future<Output = Result<()>> + Send;

    /// Waits for the next message.
    fn receive(&mut self) -> impl Future<Output = Result<Message>> + Send;
}

/// [`Channel`] over an async byte stream such as a TCP socket or
/// [`tokio::io::duplex`] pipe.
#[derive(Debug)]
pub struct StreamChannel<S> {
    stream: S,
}

impl<S> StreamChannel<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    /// Wraps a stream.
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    /// Returns the underlying stream.
    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S> Channel for StreamChannel<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn send(&mut self, message: Message) -> Result<()> {
        let payload = message.value().to_bytes_be();
        if payload.len() > MAX_FRAME_PAYLOAD {
            return Err(Error::Transport(format!(
                "Payload of {} bytes exceeds frame limit",
                payload.len()
            )));
        }

        let mut frame = Vec::with_capacity(5 + payload.len());
        frame.push(message.tag());
        frame.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        frame.extend_from_slice(&payload);

        self.stream.write_all(&frame).await.map_err(transport)?;
        self.stream.flush().await.map_err(transport)?;

        trace!(kind = message.kind(), len = payload.len(), "frame sent");
        Ok(())
    }

    async fn receive(&mut self) -> Result<Message> {
        let mut header = [0u8; 5];
        self.stream
            .read_exact(&mut header)
            .await
            .map_err(transport)?;

        let len = u32::from_be_bytes([header[1], header[2], header[3], header[4]]) as usize;
        if len > MAX_FRAME_PAYLOAD {
            return Err(Error::Transport(format!(
                "Frame length {len} exceeds limit"
            )));
        }

        let mut payload = vec![0u8; len];
        self.stream
            .read_exact(&mut payload)
            .await
            .map_err(transport)?;
        let value = BigUint::from_bytes_be(&payload);

        let message = match header[0] {
            TAG_COMMITMENT => Message::Commitment(Commitment::new(value)),
            TAG_CHALLENGE => Message::Challenge(value),
            TAG_RESPONSE => Message::Response(Response::new(value)),
            tag => {
                return Err(Error::Transport(format!("Unknown frame tag {tag}")));
            }
        };

        trace!(kind = message.kind(), len, "frame received");
        Ok(message)
    }
}

fn transport(err: std::io::Error) -> Error {
    Error::Transport(err.to_string())
}

/// Runs the prover side of one interactive session over `channel`.
///
/// Returns the transcript `(t, c, s)` the prover produced.
///
/// # Errors
///
/// [`Error::UnexpectedMessage`] if the peer answers with anything but a
/// challenge, [`Error::InvalidChallenge`] if `c >= q`, and
/// [`Error::Transport`] on I/O failure.
pub async fn run_prover<C, R>(channel: &mut C, mut prover: Prover<'_>, rng: &mut R) -> Result<Proof>
where
    C: Channel,
    R: CryptoRngCore,
{
    let commitment = prover.commit(rng)?;
    channel.send(Message::Commitment(commitment)).await?;

    let challenge = match channel.receive().await? {
        Message::Challenge(challenge) => challenge,
        other => {
            return Err(Error::UnexpectedMessage {
                expected: "challenge",
                actual: other.kind(),
            })
        }
    };

    let response = prover.respond(&challenge)?;
    channel.send(Message::Response(response)).await?;

    debug!("prover session completed");
    prover.finalize()
}

/// Runs the verifier side of one interactive session over `channel`.
///
/// Returns whether the prover convinced the verifier. A false proof is
/// `Ok(false)`; protocol violations are errors.
///
/// # Errors
///
/// [`Error::InvalidStatement`] if `statement` is not a subgroup element,
/// [`Error::UnexpectedMessage`] on out-of-order messages,
/// [`Error::MalformedProof`] on out-of-range values, and
/// [`Error::Transport`] on I/O failure.
pub async fn run_verifier<C, R>(
    channel: &mut C,
    params: &GroupParameters,
    statement: Statement,
    rng: &mut R,
) -> Result<bool>
where
    C: Channel,
    R: CryptoRngCore,
{
    let mut session = VerifierSession::new(params, statement)?;

    let commitment = match channel.receive().await? {
        Message::Commitment(commitment) => commitment,
        other => {
            return Err(Error::UnexpectedMessage {
                expected: "commitment",
                actual: other.kind(),
            })
        }
    };

    let challenge = session.receive_commitment(commitment, rng)?;
    channel.send(Message::Challenge(challenge)).await?;

    let response = match channel.receive().await? {
        Message::Response(response) => response,
        other => {
            return Err(Error::UnexpectedMessage {
                expected: "response",
                actual: other.kind(),
            })
        }
    };

    let accepted = session.receive_response(response)?;
    debug!(accepted, "verifier session completed");
    Ok(accepted)
}
