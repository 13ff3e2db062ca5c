//! Wire types shared by every layer

pub mod credential;
pub mod envelope;
pub mod request;
pub mod status;

pub use credential::Credential;
pub use envelope::ResponseEnvelope;
pub use request::{FilePart, FormField, HttpMethod, ParamValue, RequestDescriptor};
pub use status::ApiStatus;
