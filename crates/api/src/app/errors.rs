//! Domain error → GraphQL error mapping.

use graphcrm_core::DomainError;

/// All business-rule violations surface as one GraphQL error kind carrying
/// the validation message.
pub fn domain_error(err: DomainError) -> async_graphql::Error {
    async_graphql::Error::new(err.message())
}
