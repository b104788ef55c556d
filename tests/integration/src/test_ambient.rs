//! Health, discovery, routing and header integration tests.

#[cfg(test)]
mod tests {
    use crate::{client, url};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_report_health() {
        for path in ["/health", "/_health"] {
            let resp = client().get(url(path)).send().await.expect("request");
            assert_eq!(resp.status().as_u16(), 200);
            let json: serde_json::Value = resp.json().await.expect("json body");
            assert_eq!(json["status"], "running");
        }
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_describe_service() {
        let resp = client().get(url("/")).send().await.expect("request");
        assert_eq!(resp.status().as_u16(), 200);
        let json: serde_json::Value = resp.json().await.expect("json body");
        assert_eq!(json["message"], "SOAP Converter");
        assert!(json["endpoints"]["/rest/custom"].is_string());
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_add_common_headers() {
        let resp = client().get(url("/health")).send().await.expect("request");
        let headers = resp.headers();
        assert!(headers.contains_key("x-request-id"));
        assert_eq!(headers["server"], "soapconv");
        assert_eq!(headers["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_return_not_found_and_method_not_allowed() {
        let resp = client().get(url("/missing")).send().await.expect("request");
        assert_eq!(resp.status().as_u16(), 404);

        let resp = client().get(url("/soap")).send().await.expect("request");
        assert_eq!(resp.status().as_u16(), 405);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_answer_cors_preflight() {
        let resp = client()
            .request(reqwest::Method::OPTIONS, url("/soap"))
            .send()
            .await
            .expect("request");
        assert_eq!(resp.status().as_u16(), 200);
        assert!(resp.headers().contains_key("access-control-allow-methods"));
    }
}
