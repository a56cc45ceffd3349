use async_trait::async_trait;
use models::registrar::domain::Domain;
use models::registrar::extension::Extension;
use models::registrar::trunk::{Trunk, TrunkInfo};
use serde_json::json;
use uuid::Uuid;

use crate::outline::QueueName;
use crate::sock::{RequestMethod, Sock};
use crate::{Filters, RequestError, RequestHandlerClient};

/// registrar-manager RPCs.
#[async_trait]
pub trait RegistrarRequest: Send + Sync {
    async fn registrar_v1_domain_create(
        &self,
        customer_id: Uuid,
        domain_name: &str,
        name: &str,
        detail: &str,
    ) -> Result<Domain, RequestError>;
    async fn registrar_v1_domain_get(&self, domain_id: Uuid) -> Result<Domain, RequestError>;
    async fn registrar_v1_domain_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Domain>, RequestError>;
    async fn registrar_v1_domain_delete(&self, domain_id: Uuid) -> Result<Domain, RequestError>;
    async fn registrar_v1_domain_update(
        &self,
        domain_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<Domain, RequestError>;

    async fn registrar_v1_extension_create(
        &self,
        customer_id: Uuid,
        extension: &str,
        password: &str,
        name: &str,
        detail: &str,
    ) -> Result<Extension, RequestError>;
    async fn registrar_v1_extension_get(
        &self,
        extension_id: Uuid,
    ) -> Result<Extension, RequestError>;
    async fn registrar_v1_extension_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Extension>, RequestError>;
    async fn registrar_v1_extension_delete(
        &self,
        extension_id: Uuid,
    ) -> Result<Extension, RequestError>;
    async fn registrar_v1_extension_update(
        &self,
        extension_id: Uuid,
        name: &str,
        detail: &str,
        password: &str,
    ) -> Result<Extension, RequestError>;

    async fn registrar_v1_trunk_create(
        &self,
        customer_id: Uuid,
        domain_name: &str,
        info: &TrunkInfo,
    ) -> Result<Trunk, RequestError>;
    async fn registrar_v1_trunk_get(&self, trunk_id: Uuid) -> Result<Trunk, RequestError>;
    async fn registrar_v1_trunk_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Trunk>, RequestError>;
    async fn registrar_v1_trunk_delete(&self, trunk_id: Uuid) -> Result<Trunk, RequestError>;
    async fn registrar_v1_trunk_update_basic_info(
        &self,
        trunk_id: Uuid,
        info: &TrunkInfo,
    ) -> Result<Trunk, RequestError>;
}

const RESOURCE_DOMAIN: &str = "registrar/domains";
const RESOURCE_EXTENSION: &str = "registrar/extensions";
const RESOURCE_TRUNK: &str = "registrar/trunks";

fn trunk_body(info: &TrunkInfo) -> serde_json::Value {
    json!({
        "name": info.name,
        "detail": info.detail,
        "auth_types": info.auth_types,
        "username": info.username,
        "password": info.password,
        "allowed_ips": info.allowed_ips,
    })
}

#[async_trait]
impl<S: Sock> RegistrarRequest for RequestHandlerClient<S> {
    async fn registrar_v1_domain_create(
        &self,
        customer_id: Uuid,
        domain_name: &str,
        name: &str,
        detail: &str,
    ) -> Result<Domain, RequestError> {
        let data = json!({
            "customer_id": customer_id,
            "domain_name": domain_name,
            "name": name,
            "detail": detail
        });
        self.request(
            QueueName::Registrar,
            "/v1/domains",
            RequestMethod::Post,
            RESOURCE_DOMAIN,
            Some(data),
        ).await
    }

    async fn registrar_v1_domain_get(&self, domain_id: Uuid) -> Result<Domain, RequestError> {
        self.request(
            QueueName::Registrar,
            &format!("/v1/domains/{domain_id}"),
            RequestMethod::Get,
            RESOURCE_DOMAIN,
            None,
        ).await
    }

    async fn registrar_v1_domain_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Domain>, RequestError> {
        self.request_list(
            QueueName::Registrar,
            "/v1/domains",
            token,
            size,
            filters,
            RESOURCE_DOMAIN,
        ).await
    }

    async fn registrar_v1_domain_delete(&self, domain_id: Uuid) -> Result<Domain, RequestError> {
        self.request(
            QueueName::Registrar,
            &format!("/v1/domains/{domain_id}"),
            RequestMethod::Delete,
            RESOURCE_DOMAIN,
            None,
        ).await
    }

    async fn registrar_v1_domain_update(
        &self,
        domain_id: Uuid,
        name: &str,
        detail: &str,
    ) -> Result<Domain, RequestError> {
        let data = json!({"name": name, "detail": detail});
        self.request(
            QueueName::Registrar,
            &format!("/v1/domains/{domain_id}"),
            RequestMethod::Put,
            RESOURCE_DOMAIN,
            Some(data),
        ).await
    }

    async fn registrar_v1_extension_create(
        &self,
        customer_id: Uuid,
        extension: &str,
        password: &str,
        name: &str,
        detail: &str,
    ) -> Result<Extension, RequestError> {
        let data = json!({
            "customer_id": customer_id,
            "extension": extension,
            "password": password,
            "name": name,
            "detail": detail
        });
        self.request(
            QueueName::Registrar,
            "/v1/extensions",
            RequestMethod::Post,
            RESOURCE_EXTENSION,
            Some(data),
        ).await
    }

    async fn registrar_v1_extension_get(
        &self,
        extension_id: Uuid,
    ) -> Result<Extension, RequestError> {
        self.request(
            QueueName::Registrar,
            &format!("/v1/extensions/{extension_id}"),
            RequestMethod::Get,
            RESOURCE_EXTENSION,
            None,
        ).await
    }

    async fn registrar_v1_extension_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Extension>, RequestError> {
        self.request_list(
            QueueName::Registrar,
            "/v1/extensions",
            token,
            size,
            filters,
            RESOURCE_EXTENSION,
        ).await
    }

    async fn registrar_v1_extension_delete(
        &self,
        extension_id: Uuid,
    ) -> Result<Extension, RequestError> {
        self.request(
            QueueName::Registrar,
            &format!("/v1/extensions/{extension_id}"),
            RequestMethod::Delete,
            RESOURCE_EXTENSION,
            None,
        ).await
    }

    async fn registrar_v1_extension_update(
        &self,
        extension_id: Uuid,
        name: &str,
        detail: &str,
        password: &str,
    ) -> Result<Extension, RequestError> {
        let data = json!({"name": name, "detail": detail, "password": password});
        self.request(
            QueueName::Registrar,
            &format!("/v1/extensions/{extension_id}"),
            RequestMethod::Put,
            RESOURCE_EXTENSION,
            Some(data),
        ).await
    }

    async fn registrar_v1_trunk_create(
        &self,
        customer_id: Uuid,
        domain_name: &str,
        info: &TrunkInfo,
    ) -> Result<Trunk, RequestError> {
        let mut data = trunk_body(info);
        data["customer_id"] = json!(customer_id);
        data["domain_name"] = json!(domain_name);
        self.request(
            QueueName::Registrar,
            "/v1/trunks",
            RequestMethod::Post,
            RESOURCE_TRUNK,
            Some(data),
        ).await
    }

    async fn registrar_v1_trunk_get(&self, trunk_id: Uuid) -> Result<Trunk, RequestError> {
        self.request(
            QueueName::Registrar,
            &format!("/v1/trunks/{trunk_id}"),
            RequestMethod::Get,
            RESOURCE_TRUNK,
            None,
        ).await
    }

    async fn registrar_v1_trunk_list(
        &self,
        token: &str,
        size: u64,
        filters: &Filters,
    ) -> Result<Vec<Trunk>, RequestError> {
        self.request_list(QueueName::Registrar, "/v1/trunks", token, size, filters, RESOURCE_TRUNK)
            .await
    }

    async fn registrar_v1_trunk_delete(&self, trunk_id: Uuid) -> Result<Trunk, RequestError> {
        self.request(
            QueueName::Registrar,
            &format!("/v1/trunks/{trunk_id}"),
            RequestMethod::Delete,
            RESOURCE_TRUNK,
            None,
        ).await
    }

    async fn registrar_v1_trunk_update_basic_info(
        &self,
        trunk_id: Uuid,
        info: &TrunkInfo,
    ) -> Result<Trunk, RequestError> {
        self.request(
            QueueName::Registrar,
            &format!("/v1/trunks/{trunk_id}"),
            RequestMethod::Put,
            RESOURCE_TRUNK,
            Some(trunk_body(info)),
        ).await
    }
}
