use std::collections::HashSet;

use cep_core::AppError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::integration::common::{
    FOUND_HTML, NOT_FOUND_HTML, RELAXATION_HTML, SEARCH_PATH, UNIDADE_HTML, mount_page,
    setup_test_app,
};

#[tokio::test]
async fn found_page_yields_normalized_record() {
    let app = setup_test_app().await;
    mount_page(&app.server, FOUND_HTML).await;

    let records = app.tracker().track("01310100").await.unwrap();

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.get("logradouro"), Some("Avenida Paulista"));
    assert_eq!(record.get("complemento"), Some("de 612 a 1510 - lado par"));
    assert_eq!(record.get("bairro"), Some("Bela Vista"));
    assert_eq!(record.get("cidade"), Some("São Paulo"));
    assert_eq!(record.get("estado"), Some("SP"));
    assert_eq!(record.get("cep"), Some("01310100"));
    assert!(!record.is_not_found());
}

#[tokio::test]
async fn empty_results_yield_single_not_found_record() {
    let app = setup_test_app().await;
    mount_page(&app.server, NOT_FOUND_HTML).await;

    let records = app.tracker().track("99999999").await.unwrap();

    assert_eq!(records.len(), 1);
    assert!(records[0].is_not_found());
    assert_eq!(records[0].get("cep"), Some("99999999"));
}

#[tokio::test]
async fn relaxation_rows_keep_order_and_link_text() {
    let app = setup_test_app().await;
    mount_page(&app.server, RELAXATION_HTML).await;

    let records = app.tracker().track("13010002").await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("logradouro"), Some("Rua das Flores"));
    assert_eq!(records[0].get("cidade"), Some("Campinas"));
    assert_eq!(records[0].get("estado"), Some("SP"));
    assert_eq!(records[1].get("logradouro"), Some("Rua Barão de Jaguara"));
    assert_eq!(records[1].get("complemento"), Some("até 500/501"));
    assert_eq!(records[1].get("cep"), Some("13010002"));
    assert!(records.iter().all(|r| !r.is_not_found()));
}

#[tokio::test]
async fn relaxation_rows_without_query_append_not_found_last() {
    let app = setup_test_app().await;
    mount_page(&app.server, RELAXATION_HTML).await;

    let records = app.tracker().track("13010000").await.unwrap();

    assert_eq!(records.len(), 3);
    assert!(records[..2].iter().all(|r| !r.is_not_found()));
    assert!(records[2].is_not_found());
    assert_eq!(records[2].get("cep"), Some("13010000"));

    let timestamps: HashSet<_> = records.iter().map(|r| r.meta.v_date).collect();
    assert_eq!(timestamps.len(), 1);
}

#[tokio::test]
async fn endereco_label_writes_both_keys() {
    let app = setup_test_app().await;
    mount_page(&app.server, UNIDADE_HTML).await;

    let records = app.tracker().track("01001970").await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("endereco"), Some("Praça da Sé, 108"));
    assert_eq!(records[0].get("endereço"), Some("Praça da Sé, 108"));
    assert_eq!(records[0].get("unidade"), Some("AC Sé"));
    assert_eq!(records[0].get("cep"), Some("01001970"));
}

#[tokio::test]
async fn records_serialize_with_meta_block() {
    let app = setup_test_app().await;
    mount_page(&app.server, NOT_FOUND_HTML).await;

    let records = app.tracker().track("99999999").await.unwrap();
    let json = serde_json::to_value(&records).unwrap();

    assert_eq!(json[0]["cep"], "99999999");
    assert_eq!(json[0]["_meta"]["__notfound__"], true);
    assert!(json[0]["_meta"]["v_date"].is_string());
}

#[tokio::test]
async fn upstream_failure_fails_the_lookup() {
    let app = setup_test_app().await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.server)
        .await;

    let err = app.tracker().track("01310100").await.unwrap_err();

    assert!(matches!(err, AppError::HttpStatus { status: 500, .. }));
}
