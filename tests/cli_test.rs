mod common;

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_ready_request() {
    let output = Command::new(cargo_bin!("paysheet"))
        .arg("ready-request")
        .output()
        .unwrap();
    assert!(output.status.success());

    let doc = common::stdout_json(&output.stdout);
    assert_eq!(doc["apiVersion"], 2);
    assert_eq!(doc["apiVersionMinor"], 0);
    assert_eq!(
        doc["allowedPaymentMethods"][0]["parameters"]["allowedCardNetworks"],
        serde_json::json!(["AMEX", "DISCOVER", "JCB", "MASTERCARD", "VISA"])
    );
    assert!(doc["allowedPaymentMethods"][0]
        .get("tokenizationSpecification")
        .is_none());
}

#[test]
fn test_payment_request_adds_default_shipping() {
    let mut cmd = Command::new(cargo_bin!("paysheet"));
    cmd.args(["payment-request", "--price", "10.00"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""totalPrice": "100.00""#))
        .stdout(predicate::str::contains(r#""totalPriceStatus": "FINAL""#))
        .stdout(predicate::str::contains(r#""merchantName": "Example Merchant""#));
}

#[test]
fn test_payment_request_with_config_file() {
    let output = Command::new(cargo_bin!("paysheet"))
        .args(["--config", "tests/fixtures/stripe_config.json"])
        .args(["payment-request", "--price", "24.99", "--shipping", "0"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let doc = common::stdout_json(&output.stdout);
    assert_eq!(doc["transactionInfo"]["totalPrice"], "24.99");
    assert_eq!(doc["transactionInfo"]["currencyCode"], "EUR");
    assert_eq!(
        doc["allowedPaymentMethods"][0]["tokenizationSpecification"]["parameters"]["gateway"],
        "stripe"
    );
    assert_eq!(
        doc["shippingAddressParameters"]["allowedCountryCodes"],
        serde_json::json!(["DE", "FR", "NL"])
    );
}

#[test]
fn test_negative_price_rejected() {
    let mut cmd = Command::new(cargo_bin!("paysheet"));
    cmd.args(["payment-request", "--price=-1.00"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"));
}

#[test]
fn test_direct_spec_with_placeholder_key_fails() {
    let mut cmd = Command::new(cargo_bin!("paysheet"));
    cmd.arg("direct-spec");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_direct_spec_with_configured_key() {
    let config = common::json_file(&serde_json::json!({
        "directTokenization": {
            "protocolVersion": "ECv2",
            "publicKey": "BOdoXP+9Aq473SnGwg3JU1"
        }
    }));

    let mut cmd = Command::new(cargo_bin!("paysheet"));
    cmd.arg("--config").arg(config.path()).arg("direct-spec");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""type": "DIRECT""#))
        .stdout(predicate::str::contains(r#""protocolVersion": "ECv2""#));
}

#[test]
fn test_invalid_config_file_fails() {
    let config = common::json_file(&serde_json::json!({"cardNetworks": []}));

    let mut cmd = Command::new(cargo_bin!("paysheet"));
    cmd.arg("--config").arg(config.path()).arg("ready-request");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("cardNetworks must not be empty"));
}
