//! SOAP/XML to JSON integration tests.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::post_raw;

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_convert_soap_to_json() {
        let (status, body) = post_raw(
            "/soap",
            "<GetWeather><City>Moscow</City><City>Paris</City></GetWeather>",
        )
        .await
        .expect("request");
        assert_eq!(status, 200);
        let json: serde_json::Value = serde_json::from_str(&body).expect("json body");
        assert_eq!(json, json!({"GetWeather": {"City": ["Moscow", "Paris"]}}));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_normalize_soap_as_xml() {
        let (status, body) = post_raw("/soap?format=xml", "<a><b x=\"1\">t</b></a>")
            .await
            .expect("request");
        assert_eq!(status, 200);
        assert!(body.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(body.contains("<b x=\"1\">t</b>"));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_invalid_format() {
        let (status, body) = post_raw("/soap?format=yaml", "<a/>").await.expect("request");
        assert_eq!(status, 422);
        assert!(body.contains("ValidationError"));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_empty_and_malformed_xml() {
        let (status, body) = post_raw("/soap", "").await.expect("request");
        assert_eq!(status, 400);
        assert!(body.contains("EmptyBody"));

        let (status, body) = post_raw("/soap", "<a><b></a>").await.expect("request");
        assert_eq!(status, 400);
        assert!(body.contains("ParseError"));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_extract_soap_body() {
        let (status, body) = post_raw(
            "/soap/extract",
            "<soap:Envelope><soap:Body><Foo>1</Foo></soap:Body></soap:Envelope>",
        )
        .await
        .expect("request");
        assert_eq!(status, 200);
        let json: serde_json::Value = serde_json::from_str(&body).expect("json body");
        assert_eq!(json, json!({"Foo": "1"}));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_extract_whole_document_without_envelope() {
        let (status, body) = post_raw("/soap/extract/", "<note><to>Tove</to></note>")
            .await
            .expect("request");
        assert_eq!(status, 200);
        let json: serde_json::Value = serde_json::from_str(&body).expect("json body");
        assert_eq!(json, json!({"note": {"to": "Tove"}}));
    }
}
