use chrono::NaiveDate;

use payzen_core::domain::{
    ContactDetails, Frequency, PartyStatus, SubscriptionInfos, Transaction, TransactionCustomer,
    TransactionKind, TransactionProduct, TransactionShipping,
};
use payzen_core::services::{
    CallbackUrls, FormFieldsService, GatewayMode, SequenceAllocator, SignatureService,
};

const CERTIFICATE: &str = "1122334455667788";

fn signer() -> SignatureService {
    SignatureService::new(GatewayMode::Test, CERTIFICATE, "prod-cert")
}

fn service(dir: &tempfile::TempDir) -> FormFieldsService {
    FormFieldsService::new(
        "12345678",
        CallbackUrls {
            return_url: "https://shop.example/payment/return".to_string(),
            check_url: "https://shop.example/payment/check".to_string(),
        },
        SequenceAllocator::new(dir.path().join("trans_numbers")),
        signer(),
    )
}

fn full_transaction() -> Transaction {
    let mut tx = Transaction::new(4500, "978");
    tx.kind = TransactionKind::PaymentSubscribe;
    tx.customer = Some(TransactionCustomer {
        contact: ContactDetails {
            status: PartyStatus::Private,
            firstname: Some("Jean".to_string()),
            lastname: Some("Valjean".to_string()),
            street_number: Some("55".to_string()),
            address: Some("rue du Faubourg".to_string()),
            postal_code: Some("75008".to_string()),
            city: Some("Paris".to_string()),
            country: Some("FR".to_string()),
            phone: Some("+33123456789".to_string()),
            ..ContactDetails::default()
        },
        customer_id: Some("cust-24601".to_string()),
        title: Some("M".to_string()),
        email: Some("jean@example.com".to_string()),
    });
    tx.shipping = Some(TransactionShipping {
        contact: ContactDetails {
            status: PartyStatus::Private,
            firstname: Some("Jean".to_string()),
            lastname: Some("Valjean".to_string()),
            city: Some("Paris".to_string()),
            country: Some("FR".to_string()),
            ..ContactDetails::default()
        },
        complementary_address: Some("Apt 3".to_string()),
    });
    let mut product = TransactionProduct::new("subscription setup", 4500);
    product.reference = "SETUP-1".to_string();
    product.set_vat(20.0);
    tx.add_product(product);
    let mut subscription = SubscriptionInfos::new(
        990,
        NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
        Frequency::Month,
    );
    subscription.set_month_day(31);
    tx.subscription = Some(subscription);
    tx
}

#[test]
fn full_form_verifies_like_the_gateway_would() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(&dir);
    let mut tx = full_transaction();

    let form = service.build(&mut tx).unwrap();

    // The gateway recomputes the signature over the posted fields.
    assert!(signer().verify(&form.signature, &form.fields));

    // Changing one signed field must break it, as it does on the wire.
    let mut tampered = form.fields.clone();
    tampered.insert("vads_amount", "1");
    assert!(!signer().verify(&form.signature, &tampered));
}

#[test]
fn full_form_carries_every_block() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(&dir);
    let mut tx = full_transaction();

    let form = service.build(&mut tx).unwrap();
    let fields = &form.fields;

    for key in [
        "vads_cust_email",
        "vads_cust_id",
        "vads_cust_status",
        "vads_cust_title",
        "vads_cust_first_name",
        "vads_cust_last_name",
        "vads_cust_legal_name",
        "vads_cust_address_number",
        "vads_cust_address",
        "vads_cust_zip",
        "vads_cust_city",
        "vads_cust_state",
        "vads_cust_country",
        "vads_cust_phone",
    ] {
        assert!(fields.contains(key), "missing customer field {key}");
    }
    for key in [
        "vads_ship_to_status",
        "vads_ship_to_first_name",
        "vads_ship_to_last_name",
        "vads_ship_to_legal_name",
        "vads_ship_to_phone_num",
        "vads_ship_to_street_number",
        "vads_ship_to_street",
        "vads_ship_to_street2",
        "vads_ship_to_zip",
        "vads_ship_to_city",
        "vads_ship_to_state",
        "vads_ship_to_country",
    ] {
        assert!(fields.contains(key), "missing shipping field {key}");
    }

    assert_eq!(fields.get("vads_nb_products"), Some("1"));
    assert_eq!(fields.get("vads_product_label0"), Some("subscription setup"));
    assert_eq!(fields.get("vads_product_vat0"), Some("20"));

    assert_eq!(fields.get("vads_page_action"), Some("REGISTER_PAY_SUBSCRIBE"));
    assert_eq!(fields.get("vads_sub_amount"), Some("990"));
    assert_eq!(fields.get("vads_sub_effect_date"), Some("20240801"));
    assert_eq!(
        fields.get("vads_sub_desc"),
        Some("RRULE:FREQ=MONTHLY;BYMONTHDAY=28,29,30,31;INTERVAL=1;")
    );
}

#[test]
fn bounded_yearly_schedule_encodes_count_interval_and_until() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(&dir);
    let mut tx = Transaction::new(0, "978");
    tx.kind = TransactionKind::Subscribe;
    let mut subscription = SubscriptionInfos::new(
        12000,
        NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
        Frequency::Year,
    );
    subscription.set_month_day(15);
    subscription.set_count(5);
    subscription.set_interval(2);
    subscription.end_date = NaiveDate::from_ymd_opt(2025, 1, 1);
    tx.subscription = Some(subscription);

    let form = service.build(&mut tx).unwrap();
    assert_eq!(
        form.fields.get("vads_sub_desc"),
        Some("RRULE:FREQ=YEARLY;BYMONTHDAY=15;COUNT=5;INTERVAL=2;UNTIL=20250101;")
    );
    assert_eq!(form.fields.get("vads_amount"), None);
}

#[test]
fn sequence_numbers_flow_into_consecutive_forms() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(&dir);

    let mut first = Transaction::new(1000, "978");
    let mut second = Transaction::new(1000, "978");
    let first_form = service.build(&mut first).unwrap();
    let second_form = service.build(&mut second).unwrap();

    assert_eq!(first_form.fields.get("vads_trans_id"), Some("000001"));
    assert_eq!(second_form.fields.get("vads_trans_id"), Some("000002"));
}

#[test]
fn sequence_wraps_at_the_six_digit_boundary() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("trans_numbers"), "899999").unwrap();
    let service = service(&dir);

    let mut first = Transaction::new(1000, "978");
    let mut second = Transaction::new(1000, "978");
    assert_eq!(
        service
            .build(&mut first)
            .unwrap()
            .fields
            .get("vads_trans_id"),
        Some("000000")
    );
    assert_eq!(
        service
            .build(&mut second)
            .unwrap()
            .fields
            .get("vads_trans_id"),
        Some("000001")
    );
}
