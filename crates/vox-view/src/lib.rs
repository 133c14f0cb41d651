//! Vox View: JSON view descriptors and spoken-style responses.
//!
//! Both outputs of a reply come from here: the view built by a registry
//! of per-app builders, and the sentence rendered from locale-keyed
//! templates. They share one stats context so they can never disagree
//! about a number.
//!
//! # Example
//!
//! ```
//! use vox_view::{ResponseRenderer, ViewRegistry};
//! use vox_core::{AppType, Confidence, DomainData, Intent, Locale};
//!
//! let registry = ViewRegistry::with_defaults(vec![]);
//! let renderer = ResponseRenderer::defaults();
//!
//! let intent = Intent::new(AppType::Documents, "show_all", Confidence::Exact);
//! let (view, stats) = registry.build(&intent, &DomainData::Documents { items: vec![] });
//! let text = renderer.render(&intent, &stats, Locale::Pl);
//! assert!(text.contains("0 dokumentów"));
//! assert_eq!(view.stat("Dokumentów"), Some(&serde_json::json!(0)));
//! ```

pub mod registry;
pub mod responses;
pub mod stats;
pub mod views;

pub use registry::{ViewBuilder, ViewRegistry};
pub use responses::ResponseRenderer;
pub use stats::{format_amount, format_pln};
pub use views::{access_denied_view, degraded_view, generic_view, unknown_view, welcome_view};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vox_core::{AppType, Confidence, Document, DomainData, Intent, Locale, ViewKind};

    fn doc(vendor: &str, gross: f64, status: &str) -> Document {
        Document {
            id: "d1".to_string(),
            filename: "FV_1.pdf".to_string(),
            vendor: vendor.to_string(),
            nip: "123".to_string(),
            amount_net: gross,
            amount_vat: 0.0,
            amount_gross: gross,
            date: "2026-08-01".to_string(),
            due_date: "2026-08-15".to_string(),
            status: status.to_string(),
            scanned_at: "2026-08-06 10:00:00".to_string(),
        }
    }

    #[test]
    fn view_and_response_totals_agree() {
        // The cross-consistency invariant: the stats block total equals the
        // total spoken in the response, byte for byte.
        let registry = ViewRegistry::with_defaults(vec![]);
        let renderer = ResponseRenderer::defaults();
        let intent = Intent::new(AppType::Documents, "show_all", Confidence::Exact);

        let data = DomainData::Documents {
            items: vec![
                doc("ABC", 1200.50, "Nowa"),
                doc("XYZ", 799.50, "Zapłacona"),
            ],
        };
        let (view, stats) = registry.build(&intent, &data);
        let response = renderer.render(&intent, &stats, Locale::Pl);

        let displayed = view.stat("Suma brutto").unwrap().as_str().unwrap();
        assert_eq!(displayed, "2 000,00 PLN");
        assert!(response.contains(displayed));
    }

    #[test]
    fn empty_document_list_is_consistent_at_zero() {
        let registry = ViewRegistry::with_defaults(vec![]);
        let renderer = ResponseRenderer::defaults();
        let intent = Intent::new(AppType::Documents, "show_all", Confidence::Exact);

        let (view, stats) = registry.build(&intent, &DomainData::Documents { items: vec![] });
        let response = renderer.render(&intent, &stats, Locale::Pl);

        assert_eq!(view.stat("Dokumentów"), Some(&json!(0)));
        assert_eq!(view.stat("Suma brutto"), Some(&json!("0,00 PLN")));
        assert!(response.contains("0 dokumentów"));
        assert!(response.contains("0,00 PLN"));
    }

    #[test]
    fn documents_table_has_vendor_and_amount_columns() {
        let registry = ViewRegistry::with_defaults(vec![]);
        let intent = Intent::new(AppType::Documents, "show_all", Confidence::Exact);
        let (view, _) = registry.build(&intent, &DomainData::Documents { items: vec![] });

        assert_eq!(view.kind, ViewKind::Table);
        let keys: Vec<&str> = view.columns.iter().map(|c| c.key.as_str()).collect();
        assert!(keys.contains(&"vendor"));
        assert!(keys.contains(&"amount_gross"));
    }

    #[test]
    fn denied_view_carries_no_data() {
        let view = access_denied_view(AppType::Documents);
        assert_eq!(view.kind, ViewKind::AccessDenied);
        assert!(view.data.is_null());
        assert!(view.stats.is_empty());
    }
}
