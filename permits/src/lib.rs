//! Permit issuing on top of [`vizhash`]: ownership checks, expiry queries and
//! attaching a fresh visual hash whenever a permit is handed out.

mod collaborators;
mod errors;
mod service;
mod store;

pub use crate::collaborators::{Clock, Person, PersonProvider, PhotoProvider, SystemClock};
pub use crate::errors::PermitError;
pub use crate::service::{PermitService, PERMIT_IMAGE_SIZE, PERMIT_VALIDITY_HOURS};
pub use crate::store::{MemoryPermitStore, PermitStore};
pub use structures::{NewPermit, Permit};
