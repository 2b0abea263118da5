//! Payload decoding for workflow history events.
//!
//! Two paths, one result shape:
//! - [`decode_payload`]: pure, synchronous, total local decoding of the
//!   plaintext encodings; everything else passes through untouched.
//! - [`PayloadConverter`]: walks whole events, optionally round-tripping
//!   payloads through a remote [`DataConverter`], and records the outcome
//!   in an injectable [`StatusCell`].

pub mod convert;
pub mod converter;
pub mod decode;
pub mod status;

pub use convert::{decode_event, Conversion, PayloadConverter};
pub use converter::http::HttpConverter;
pub use converter::{ConverterConfig, ConverterError, DataConverter};
pub use decode::{decode_payload, Encoding};
pub use status::{ConversionStatus, RequestTicket, StatusCell};
