//! JSON to SOAP integration tests.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{post_json, post_raw};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_convert_rest_to_soap() {
        let (status, body) = post_json(
            "/rest",
            &json!({"data": {"city": "Moscow", "temperature": 20}}),
        )
        .await
        .expect("request");
        assert_eq!(status, 200);
        assert!(body.contains(
            r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">"#
        ));
        assert!(body.contains("<Request>"));
        assert!(body.contains("<city>Moscow</city>"));
        assert!(body.contains("<temperature>20</temperature>"));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_use_sample_data_when_missing() {
        let (status, body) = post_json("/rest", &json!({})).await.expect("request");
        assert_eq!(status, 200);
        assert!(body.contains("<city>Moscow</city>"));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_malformed_rest_body() {
        let (status, body) = post_raw("/rest", "{not json").await.expect("request");
        assert_eq!(status, 422);
        assert!(body.contains("ValidationError"));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_convert_rest_custom_to_soap() {
        let (status, body) = post_json(
            "/rest/custom",
            &json!({"root_element": "GetWeather", "data": {"City": "Moscow"}}),
        )
        .await
        .expect("request");
        assert_eq!(status, 200);
        assert!(body.contains("<GetWeather>"));
        assert!(body.contains("<City>Moscow</City>"));
        assert!(body.contains("</GetWeather>"));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_validate_rest_custom_body() {
        let (status, _) = post_json("/rest/custom", &json!({"data": {}}))
            .await
            .expect("request");
        assert_eq!(status, 422);

        let (status, _) = post_json("/rest/custom", &json!({"root_element": "", "data": {}}))
            .await
            .expect("request");
        assert_eq!(status, 422);
    }
}
