use std::time::Duration;

use esgscope_core::{EsgConnector, EsgError, LookupOutcome, MetricValue, Ticker};
use esgscope_providers::http::{base_url, build_client};
use esgscope_providers::{
    AlphaVantageConnector, BursaConnector, DeutscheBoerseConnector, JpxConnector, LseConnector,
};
use httpmock::{Method::GET, MockServer};

fn t(s: &str) -> Ticker {
    Ticker::new(s).unwrap()
}

fn client() -> reqwest::Client {
    build_client(Duration::from_secs(5)).unwrap()
}

async fn fetch(c: &dyn EsgConnector, ticker: &str) -> LookupOutcome {
    c.as_esg_provider().unwrap().fetch(&t(ticker)).await
}

#[tokio::test]
async fn bursa_company_page() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/market/company/MAYBANK");
        then.status(200)
            .header("content-type", "text/html")
            .body(
                r#"<html><h1 class="company-name">Malayan Banking Berhad</h1>
                   <div class="esg-env-score">72.5</div>
                   <div class="esg-soc-score">68.0</div></html>"#,
            );
    });

    let c = BursaConnector::new(client(), base_url(&server.base_url()).unwrap());
    let out = fetch(&c, "MAYBANK.KL").await;

    mock.assert();
    let r = out.result().expect("found");
    assert_eq!(r.company, "Malayan Banking Berhad");
    assert_eq!(r.metrics.len(), 2);
    assert_eq!(r.metrics[0].source, "Bursa Malaysia");
}

#[tokio::test]
async fn bursa_404_is_not_found() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/market/company/NOPE");
        then.status(404);
    });

    let c = BursaConnector::new(client(), base_url(&server.base_url()).unwrap());
    let out = fetch(&c, "NOPE.KL").await;
    assert!(matches!(out.error(), Some(EsgError::NotFound { .. })));
}

#[tokio::test]
async fn bursa_page_without_scores_is_unavailable() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/market/company/EMPTY");
        then.status(200)
            .body(r#"<h1 class="company-name">Empty Berhad</h1>"#);
    });

    let c = BursaConnector::new(client(), base_url(&server.base_url()).unwrap());
    let out = fetch(&c, "EMPTY.KL").await;
    assert!(matches!(out.error(), Some(EsgError::Data(_))));
}

#[tokio::test]
async fn deutsche_boerse_json() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/esg/SAP");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"companyName":"SAP SE","riskScore":12.4,"lastUpdated":"2024-11-30"}"#);
    });

    let c = DeutscheBoerseConnector::new(client(), base_url(&server.base_url()).unwrap());
    let out = fetch(&c, "SAP.DE").await;

    mock.assert();
    let r = out.result().expect("found");
    assert_eq!(r.company, "SAP SE");
    let risk = r.metric("ESG Risk Score").unwrap();
    assert_eq!(risk.value, MetricValue::Number(12.4));
    assert_eq!(risk.last_updated.as_deref(), Some("2024-11-30"));
}

#[tokio::test]
async fn deutsche_boerse_garbage_is_data_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/esg/SAP");
        then.status(200).body("<html>maintenance</html>");
    });

    let c = DeutscheBoerseConnector::new(client(), base_url(&server.base_url()).unwrap());
    let out = fetch(&c, "SAP.F").await;
    assert!(matches!(out.error(), Some(EsgError::Data(_))));
}

#[tokio::test]
async fn lse_rating_page() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/stock/RIO/esg");
        then.status(200).body(
            r#"<h1 class="company-name">RIO TINTO PLC</h1>
               <div class="esg-rating">AA</div>
               <div class="ftse4good-rating">4.1</div>"#,
        );
    });

    let c = LseConnector::new(client(), base_url(&server.base_url()).unwrap());
    let out = fetch(&c, "RIO.L").await;
    let r = out.result().expect("found");
    assert_eq!(r.company, "RIO TINTO PLC");
    assert_eq!(r.metric("ESG Rating").unwrap().value, MetricValue::Text("AA".into()));
    assert_eq!(r.metric("FTSE4Good").unwrap().value, MetricValue::Number(4.1));
}

#[tokio::test]
async fn lse_server_error_is_connector_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/stock/RIO/esg");
        then.status(503);
    });

    let c = LseConnector::new(client(), base_url(&server.base_url()).unwrap());
    let out = fetch(&c, "RIO.L").await;
    match out.error() {
        Some(EsgError::Connector { connector, msg }) => {
            assert_eq!(connector, "london-stock-exchange");
            assert!(msg.contains("503"), "{msg}");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn jpx_total_score_table() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/english/listing/esg/7203.html");
        then.status(200).body(
            r#"<h1 class="company-name">TOYOTA MOTOR CORPORATION</h1>
               <table id="esg-metrics"><tr><td>Total Score</td><td>4.2</td></tr></table>"#,
        );
    });

    let c = JpxConnector::new(client(), base_url(&server.base_url()).unwrap());
    let out = fetch(&c, "7203.T").await;
    let r = out.result().expect("found");
    assert_eq!(r.metrics[0].name, "JPX ESG Score");
    assert_eq!(r.metrics[0].source, "Tokyo Stock Exchange");
}

#[tokio::test]
async fn alpha_vantage_query_and_fields() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/query")
            .query_param("function", "ESG_SCORE")
            .query_param("symbol", "AAPL")
            .query_param("apikey", "demo");
        then.status(200).header("content-type", "application/json").body(
            r#"{"name":"Apple Inc","ESG Score":"71.2","Environmental Score":"65",
                "Social Score":"N/A","Governance Score":"80","Last Updated":"2024-06-01"}"#,
        );
    });

    let c = AlphaVantageConnector::new(client(), base_url(&server.base_url()).unwrap(), "demo");
    let out = fetch(&c, "AAPL.US").await;

    mock.assert();
    let r = out.result().expect("found");
    assert_eq!(r.company, "Apple Inc");
    let names: Vec<&str> = r.metrics.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["ESG Score", "Environmental", "Governance"]);
}

#[tokio::test]
async fn alpha_vantage_rate_limit_note() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/query");
        then.status(200)
            .body(r#"{"Note":"Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute"}"#);
    });

    let c = AlphaVantageConnector::new(client(), base_url(&server.base_url()).unwrap(), "demo");
    let out = fetch(&c, "IBM").await;
    assert!(matches!(out.error(), Some(EsgError::Connector { .. })));
}
