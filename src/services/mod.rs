pub mod builder;
pub mod notification;
pub mod sequence;
pub mod signature;
pub mod webservice;

pub use builder::{CallbackUrls, FormFieldsService, PaymentForm};
pub use notification::{IgnoreReason, NotificationOutcome, NotificationProcessor};
pub use sequence::SequenceAllocator;
pub use signature::{GatewayMode, SignatureService};
pub use webservice::{
    CancelSubscriptionQuery, CancellationTransport, RequestHeaders, TokenDirection,
    WebserviceClient,
};
