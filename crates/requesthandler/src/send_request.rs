//! Envelope building, timing and reply decoding shared by every RPC.

use std::time::Instant;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::errors::RequestError;
use crate::metrics::REQUEST_PROCESS_TIME;
use crate::outline::QueueName;
use crate::sock::{Request, RequestMethod, Response, Sock, CONTENT_TYPE_JSON};
use crate::{Filters, RequestHandlerClient};

impl<S: Sock> RequestHandlerClient<S> {
    /// Publish one request to `queue` and wait for the raw reply.
    /// `resource` only labels the metric.
    pub(crate) async fn send_request(
        &self,
        queue: QueueName,
        uri: &str,
        method: RequestMethod,
        resource: &str,
        data: Option<Value>,
    ) -> Result<Response, RequestError> {
        let req = Request {
            uri: uri.to_string(),
            method,
            publisher: self.publisher.clone(),
            data_type: if data.is_some() { CONTENT_TYPE_JSON.to_string() } else { String::new() },
            data,
        };

        let target = queue.queue();
        let start = Instant::now();
        let res = self.sock.request_publish(&target, &req, self.timeout).await;
        let elapsed = start.elapsed().as_secs_f64() * 1000.0;
        REQUEST_PROCESS_TIME
            .with_label_values(&[queue.service(), resource, method.as_str()])
            .observe(elapsed);

        match &res {
            Ok(r) => debug!(
                queue = %target,
                uri = %uri,
                method = %method,
                status_code = r.status_code,
                elapsed_ms = elapsed,
                "request_sent"
            ),
            Err(e) => debug!(
                queue = %target,
                uri = %uri,
                method = %method,
                error = %e,
                "request_failed"
            ),
        }
        res
    }

    /// Send and decode the reply body into `T`.
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        queue: QueueName,
        uri: &str,
        method: RequestMethod,
        resource: &str,
        data: Option<Value>,
    ) -> Result<T, RequestError> {
        let res = self.send_request(queue, uri, method, resource, data).await?;
        parse_response(res)
    }

    /// Send and only check the status code.
    pub(crate) async fn request_empty(
        &self,
        queue: QueueName,
        uri: &str,
        method: RequestMethod,
        resource: &str,
        data: Option<Value>,
    ) -> Result<(), RequestError> {
        let res = self.send_request(queue, uri, method, resource, data).await?;
        check_status(&res)
    }

    /// Paged list: `<base>?page_token=..&page_size=..` with the filters as body.
    pub(crate) async fn request_list<T: DeserializeOwned>(
        &self,
        queue: QueueName,
        base: &str,
        token: &str,
        size: u64,
        filters: &Filters,
        resource: &str,
    ) -> Result<Vec<T>, RequestError> {
        let uri = list_uri(base, token, size);
        let data = serde_json::to_value(filters).map_err(RequestError::Marshal)?;
        let res = self.send_request(queue, &uri, RequestMethod::Get, resource, Some(data)).await?;
        parse_list(res)
    }
}

/// Anything above 299 is a failure.
pub fn check_status(res: &Response) -> Result<(), RequestError> {
    if res.status_code > 299 {
        return Err(RequestError::Status(res.status_code));
    }
    Ok(())
}

pub fn parse_response<T: DeserializeOwned>(res: Response) -> Result<T, RequestError> {
    check_status(&res)?;
    serde_json::from_value(res.data).map_err(RequestError::Unmarshal)
}

/// Like `parse_response`, but a `null` body is an empty page.
pub fn parse_list<T: DeserializeOwned>(res: Response) -> Result<Vec<T>, RequestError> {
    check_status(&res)?;
    if res.data.is_null() {
        return Ok(Vec::new());
    }
    serde_json::from_value(res.data).map_err(RequestError::Unmarshal)
}

/// ```
/// let uri = requesthandler::send_request::list_uri("/v1/calls", "2020-09-20 03:23:20.995000", 10);
/// assert_eq!(uri, "/v1/calls?page_token=2020-09-20+03%3A23%3A20.995000&page_size=10");
/// ```
pub fn list_uri(base: &str, token: &str, size: u64) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("page_token", token)
        .append_pair("page_size", &size.to_string())
        .finish();
    format!("{base}?{query}")
}

/// Serialize a request body.
pub(crate) fn to_data<T: serde::Serialize + ?Sized>(v: &T) -> Result<Option<Value>, RequestError> {
    serde_json::to_value(v).map(Some).map_err(RequestError::Marshal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_over_299_is_error() {
        let err = parse_response::<Value>(Response::json(404, Value::Null)).unwrap_err();
        assert_eq!(err.to_string(), "response code: 404");
        assert!(err.is_not_found());
        assert!(check_status(&Response::json(299, Value::Null)).is_ok());
    }

    #[test]
    fn parses_body_into_model() {
        let res = Response::json(
            200,
            json!({"id": "2f4bd474-ade1-11ec-9aca-83684de0c293", "status": "running"}),
        );
        let af: models::flow::activeflow::Activeflow = parse_response(res).unwrap();
        assert_eq!(af.status, "running");
    }

    #[test]
    fn null_list_body_is_empty_page() {
        let tags: Vec<models::tag::Tag> = parse_list(Response::json(200, Value::Null)).unwrap();
        assert!(tags.is_empty());
        assert!(matches!(
            parse_list::<models::tag::Tag>(Response::json(500, Value::Null)),
            Err(RequestError::Status(500))
        ));
    }

    #[tokio::test]
    async fn list_rpc_accepts_null_reply() {
        let rh = RequestHandlerClient::new(crate::mock::MockSock::new(), "api-manager");
        rh.sock().on(RequestMethod::Get, "/v1/calls", Value::Null);
        let filters = Filters::new();
        let calls: Vec<models::call::call::Call> = rh
            .request_list(
                QueueName::Call,
                "/v1/calls",
                "2020-09-20 03:23:20.995000",
                10,
                &filters,
                "call/calls",
            )
            .await
            .unwrap();
        assert!(calls.is_empty());
    }

    #[test]
    fn bad_body_is_unmarshal_error() {
        let res = Response::json(200, json!("not an object"));
        assert!(matches!(parse_response::<models::tag::Tag>(res), Err(RequestError::Unmarshal(_))));
    }
}
