//! Enumeration of the distribution groups owned by the resolved customer.

use crate::{
    error::Error,
    session::Session,
};
use serde::{
    Deserialize,
    Serialize,
};

/// A logical CDN delivery configuration under the customer account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionGroup {
    pub id: String,
    pub name: String,
    pub domain: String,
}

#[derive(Deserialize)]
struct GroupsEnvelope {
    response: Vec<DistributionGroup>,
}

/// Lists the distribution groups for the session's customer scope.
///
/// The order is whatever the API delivered; it is not stable across calls.
/// An account with zero groups yields an empty vec, not an error.
pub async fn list_groups(session: &Session) -> Result<Vec<DistributionGroup>, Error> {
    let token = session.token()?;
    let customer_id = session.customer_id()?;
    let path = format!("/{customer_id}/config/distributiongroups");
    let envelope: GroupsEnvelope = session
        .transport()
        .get_json(&path, token)
        .await
        .map_err(Error::into_auth)?;
    Ok(envelope.response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_deserialize_from_the_response_envelope() {
        let body = r#"{
            "response": [
                { "name": "assets", "id": "dg-42", "domain": "assets.example.net" },
                { "name": "video", "id": "dg-43", "domain": "video.example.net" }
            ]
        }"#;
        let envelope: GroupsEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.response.len(), 2);
        assert_eq!(envelope.response[0].id, "dg-42");
        assert_eq!(envelope.response[1].domain, "video.example.net");
    }

    #[test]
    fn an_empty_response_array_is_valid() {
        let envelope: GroupsEnvelope = serde_json::from_str(r#"{ "response": [] }"#).unwrap();
        assert!(envelope.response.is_empty());
    }
}
