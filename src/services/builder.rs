//! Outbound payment-form assembly.
//!
//! Produces the flat field set a merchant page posts to the hosted
//! payment page, signed and ready to render as hidden inputs.

use serde::Serialize;
use tracing::info;

use crate::domain::{
    Transaction, TransactionCustomer, TransactionKind, TransactionProduct, TransactionShipping,
};
use crate::error::SequenceError;
use crate::fields::FieldSet;
use crate::services::sequence::SequenceAllocator;
use crate::services::signature::SignatureService;

/// Callback endpoints announced to the gateway, as absolute URLs.
#[derive(Debug, Clone)]
pub struct CallbackUrls {
    pub return_url: String,
    pub check_url: String,
}

/// Signed, render-ready form content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentForm {
    pub fields: FieldSet,
    pub signature: String,
}

pub struct FormFieldsService {
    site_id: String,
    urls: CallbackUrls,
    sequences: SequenceAllocator,
    signer: SignatureService,
}

impl FormFieldsService {
    pub fn new(
        site_id: impl Into<String>,
        urls: CallbackUrls,
        sequences: SequenceAllocator,
        signer: SignatureService,
    ) -> Self {
        Self {
            site_id: site_id.into(),
            urls,
            sequences,
            signer,
        }
    }

    /// Assembles and signs the form for one transaction.
    ///
    /// Allocating the gateway transaction number is the only mutation:
    /// a transaction keeps the number of its first build, so re-rendering
    /// the form cannot burn through the sequence.
    pub fn build(&self, transaction: &mut Transaction) -> Result<PaymentForm, SequenceError> {
        let number = match transaction.number() {
            Some(number) => number.to_string(),
            None => {
                let number = self.sequences.allocate()?;
                transaction.assign_number(number.clone());
                number
            }
        };

        let mut fields = FieldSet::new();
        self.base_fields(&mut fields, transaction, &number);
        if let Some(customer) = &transaction.customer {
            customer_fields(&mut fields, customer);
        }
        if let Some(shipping) = &transaction.shipping {
            shipping_fields(&mut fields, shipping);
        }
        product_fields(&mut fields, transaction.products());
        if let Some(subscription) = &transaction.subscription {
            fields.insert("vads_sub_amount", subscription.amount.to_string());
            fields.insert("vads_sub_currency", transaction.currency.as_str());
            fields.insert(
                "vads_sub_effect_date",
                subscription.begin_date.format("%Y%m%d").to_string(),
            );
            fields.insert("vads_sub_desc", subscription.recurrence_rule());
        }

        let signature = self.signer.compute(&fields);
        info!(
            order_id = %transaction.id,
            trans_id = number.as_str(),
            page_action = page_action(transaction),
            "payment form built"
        );
        Ok(PaymentForm { fields, signature })
    }

    fn base_fields(&self, fields: &mut FieldSet, transaction: &Transaction, number: &str) {
        fields.insert("vads_version", "V2");
        fields.insert("vads_page_action", page_action(transaction));
        fields.insert("vads_action_mode", "INTERACTIVE");
        fields.insert("vads_payment_config", "SINGLE");
        fields.insert("vads_site_id", self.site_id.as_str());
        fields.insert("vads_capture_delay", "0");
        fields.insert("vads_return_mode", "POST");
        fields.insert("vads_url_return", self.urls.return_url.as_str());
        fields.insert("vads_url_check", self.urls.check_url.as_str());
        fields.insert("vads_ctx_mode", self.signer.mode().as_str());
        fields.insert("vads_currency", transaction.currency.as_str());
        fields.insert(
            "vads_trans_date",
            transaction.created_at.format("%Y%m%d%H%M%S").to_string(),
        );
        fields.insert("vads_trans_id", number);
        fields.insert("vads_order_id", transaction.id.to_string());
        // For a bare subscription the recurring amount rides in
        // vads_sub_amount instead.
        if transaction.kind != TransactionKind::Subscribe {
            fields.insert("vads_amount", transaction.amount.to_string());
        }
        if transaction.has_valid_alias() {
            if let Some(identifier) = transaction
                .alias
                .as_ref()
                .and_then(|alias| alias.identifier.as_deref())
            {
                fields.insert("vads_identifier", identifier);
            }
        }
    }
}

fn page_action(transaction: &Transaction) -> &'static str {
    let has_alias = transaction.has_valid_alias();
    match transaction.kind {
        TransactionKind::Payment if has_alias => "PAYMENT",
        TransactionKind::Payment => "REGISTER_PAY",
        TransactionKind::Subscribe if has_alias => "SUBSCRIBE",
        TransactionKind::Subscribe => "REGISTER_SUBSCRIBE",
        TransactionKind::PaymentSubscribe => "REGISTER_PAY_SUBSCRIBE",
    }
}

fn customer_fields(fields: &mut FieldSet, customer: &TransactionCustomer) {
    let contact = &customer.contact;
    fields.insert("vads_cust_email", opt(&customer.email));
    fields.insert("vads_cust_id", opt(&customer.customer_id));
    fields.insert("vads_cust_status", contact.status.as_str());
    fields.insert("vads_cust_title", opt(&customer.title));
    fields.insert("vads_cust_first_name", opt(&contact.firstname));
    fields.insert("vads_cust_last_name", opt(&contact.lastname));
    fields.insert("vads_cust_legal_name", opt(&contact.legal_name));
    fields.insert("vads_cust_address_number", opt(&contact.street_number));
    fields.insert("vads_cust_address", opt(&contact.address));
    fields.insert("vads_cust_zip", opt(&contact.postal_code));
    fields.insert("vads_cust_city", opt(&contact.city));
    fields.insert("vads_cust_state", opt(&contact.state));
    fields.insert("vads_cust_country", opt(&contact.country));
    fields.insert("vads_cust_phone", opt(&contact.phone));
}

fn shipping_fields(fields: &mut FieldSet, shipping: &TransactionShipping) {
    let contact = &shipping.contact;
    fields.insert("vads_ship_to_status", contact.status.as_str());
    fields.insert("vads_ship_to_first_name", opt(&contact.firstname));
    fields.insert("vads_ship_to_last_name", opt(&contact.lastname));
    fields.insert("vads_ship_to_legal_name", opt(&contact.legal_name));
    fields.insert("vads_ship_to_phone_num", opt(&contact.phone));
    fields.insert("vads_ship_to_street_number", opt(&contact.street_number));
    fields.insert("vads_ship_to_street", opt(&contact.address));
    fields.insert(
        "vads_ship_to_street2",
        opt(&shipping.complementary_address),
    );
    fields.insert("vads_ship_to_zip", opt(&contact.postal_code));
    fields.insert("vads_ship_to_city", opt(&contact.city));
    fields.insert("vads_ship_to_state", opt(&contact.state));
    fields.insert("vads_ship_to_country", opt(&contact.country));
}

fn product_fields(fields: &mut FieldSet, products: &[TransactionProduct]) {
    if products.is_empty() {
        return;
    }
    fields.insert("vads_nb_products", products.len().to_string());
    for (i, product) in products.iter().enumerate() {
        fields.insert(format!("vads_product_label{i}"), product.label.as_str());
        fields.insert(
            format!("vads_product_amount{i}"),
            product.amount.to_string(),
        );
        fields.insert(
            format!("vads_product_type{i}"),
            product
                .product_type()
                .map(|t| t.as_str())
                .unwrap_or_default(),
        );
        fields.insert(format!("vads_product_ref{i}"), product.reference.as_str());
        fields.insert(format!("vads_product_qty{i}"), product.quantity.to_string());
        fields.insert(format!("vads_product_vat{i}"), product.vat().to_string());
    }
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}
