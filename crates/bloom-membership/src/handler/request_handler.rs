//! Request handler for the membership filter

use std::sync::Arc;

use tracing::debug;

use crate::domain::Membership;
use crate::error::FilterError;
use crate::events::{
    AddRequest, CheckRequest, ConfigureRequest, ErrorResponse, FilterRequest, FilterResponse,
};
use crate::ports::MembershipFilterApi;

/// Maps [`FilterRequest`]s onto a [`MembershipFilterApi`]
///
/// Errors never escape as `Err`; they become [`FilterResponse::Error`] with
/// the error text carried verbatim.
pub struct FilterRequestHandler<A: MembershipFilterApi> {
    api: Arc<A>,
}

impl<A: MembershipFilterApi> Clone for FilterRequestHandler<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

impl<A: MembershipFilterApi> FilterRequestHandler<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// The wrapped API
    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    /// Handle one request
    pub fn handle(&self, request: FilterRequest) -> FilterResponse {
        let result = match request {
            FilterRequest::Configure(req) => self.handle_configure(req),
            FilterRequest::Add(req) => self.handle_add(req),
            FilterRequest::Check(req) => self.handle_check(req),
            FilterRequest::Status => self.api.status().map(FilterResponse::Status),
        };

        result.unwrap_or_else(|e| {
            debug!(error = %e, "Request failed");
            FilterResponse::Error(ErrorResponse::from(&e))
        })
    }

    fn handle_configure(&self, req: ConfigureRequest) -> Result<FilterResponse, FilterError> {
        let config = req.into_config()?;
        self.api.configure(&config)?;
        let status = self.api.status()?;
        Ok(FilterResponse::Configured {
            message: "Membership filter initialized".to_string(),
            hash_round_count: status.hash_round_count,
        })
    }

    fn handle_add(&self, req: AddRequest) -> Result<FilterResponse, FilterError> {
        self.api.add(&req.key)?;
        Ok(FilterResponse::Added {
            message: format!("Key '{}' added to the filter", req.key),
            key: req.key,
        })
    }

    fn handle_check(&self, req: CheckRequest) -> Result<FilterResponse, FilterError> {
        let membership = self.api.check(&req.key)?;
        let message = match membership {
            Membership::DefinitelyAbsent => format!("Key '{}' is definitely absent", req.key),
            Membership::PossiblyPresent => format!("Key '{}' is possibly present", req.key),
        };
        Ok(FilterResponse::Checked {
            key: req.key,
            membership,
            message,
        })
    }
}
