//! Single-page A4 invoice PDF, mirroring the paper layout of the dashboard:
//! company header, client block, amount recap, AICI status and legal footer.

use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point};
use service_core::AppError;

use crate::config::{CompanySettings, LocaleSettings};
use crate::models::{Client, Invoice};
use crate::utils::money::format_currency;

const SAP_MENTION: &str =
    "Prestations éligibles aux Services à la Personne (SAP), avance immédiate crédit d'impôt 50 %.";

fn text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    content: &str,
    size: f32,
    x: f32,
    y: f32,
) {
    layer.use_text(content, size, Mm(x), Mm(y), font);
}

fn divider(layer: &PdfLayerReference, y: f32) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(15.0), Mm(y)), false),
            (Point::new(Mm(195.0), Mm(y)), false),
        ],
        is_closed: false,
    });
}

/// Render the invoice as PDF bytes.
pub fn render_invoice(
    invoice: &Invoice,
    client: Option<&Client>,
    company: &CompanySettings,
    locale: &LocaleSettings,
) -> Result<Vec<u8>, AppError> {
    let (doc, page, layer) = PdfDocument::new("Facture", Mm(210.0), Mm(297.0), "Layer 1");
    let layer = doc.get_page(page).get_layer(layer);

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF font: {}", e)))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF font: {}", e)))?;
    let font_oblique = doc
        .add_builtin_font(BuiltinFont::HelveticaOblique)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF font: {}", e)))?;

    // Company header
    text(&layer, &font_bold, &company.name, 14.0, 15.0, 285.0);
    text(&layer, &font, &company.address, 10.0, 15.0, 279.0);
    text(
        &layer,
        &font,
        &format!("Tél. {} / {}", company.phone, company.email),
        10.0,
        15.0,
        274.0,
    );

    // Title and references
    text(&layer, &font_bold, "Facture", 16.0, 15.0, 255.0);
    let reference = match &invoice.urssaf_ref {
        Some(urssaf_ref) => format!("Référence: {}    {}", invoice.short_ref(), urssaf_ref),
        None => format!("Référence: {}", invoice.short_ref()),
    };
    text(&layer, &font, &reference, 10.0, 15.0, 249.0);

    // Client block
    let mut y = 240.0;
    text(&layer, &font_bold, "Client", 11.0, 15.0, y);
    y -= 6.0;
    match client {
        Some(client) => {
            text(&layer, &font, &client.full_name(), 10.0, 15.0, y);
            y -= 5.0;
            text(&layer, &font, &client.address, 10.0, 15.0, y);
            y -= 5.0;
            text(&layer, &font, &client.email, 10.0, 15.0, y);
        }
        None => text(&layer, &font, "(Client non trouvé)", 10.0, 15.0, y),
    }
    y -= 10.0;
    divider(&layer, y);
    y -= 8.0;

    // Amount recap
    text(&layer, &font_bold, "Récapitulatif", 11.0, 15.0, y);
    y -= 8.0;
    text(
        &layer,
        &font,
        &format!("Total TTC : {}", format_currency(invoice.total, locale)),
        10.0,
        15.0,
        y,
    );
    y -= 6.0;
    text(
        &layer,
        &font,
        &format!(
            "Avance immédiate (50 %) : -{}",
            format_currency(invoice.advance, locale)
        ),
        10.0,
        15.0,
        y,
    );
    y -= 6.0;
    text(
        &layer,
        &font_bold,
        &format!(
            "Reste à charge : {}",
            format_currency(invoice.remainder, locale)
        ),
        12.0,
        15.0,
        y,
    );
    y -= 8.0;
    text(
        &layer,
        &font,
        &format!(
            "Statut AICI : {}    Réf. URSSAF : {}",
            invoice.status,
            invoice.urssaf_ref.as_deref().unwrap_or("-")
        ),
        9.0,
        15.0,
        y,
    );
    y -= 10.0;

    text(
        &layer,
        &font,
        "Conditions : paiement du reste à charge à réception. L'avance immédiate est appliquée via l'Urssaf (dispositif AICI).",
        9.0,
        15.0,
        y,
    );
    y -= 5.0;
    text(
        &layer,
        &font,
        "En cas de rejet AICI, le montant correspondant restera dû par le client.",
        9.0,
        15.0,
        y,
    );

    // Footer
    text(&layer, &font, SAP_MENTION, 8.0, 15.0, 12.0);
    text(
        &layer,
        &font_oblique,
        "Document de simulation, aucune transmission à une administration.",
        8.0,
        120.0,
        8.0,
    );

    doc.save_to_bytes()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF encode: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InvoiceStatus, SapCategory, ServiceLine};
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    #[test]
    fn renders_a_pdf_document() {
        let invoice = Invoice {
            invoice_id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            lines: vec![ServiceLine {
                label: "Taille de haie".to_string(),
                sap_category: SapCategory::Gardening,
                quantity: Decimal::ONE,
                unit_price: Decimal::from(200),
            }],
            total: Decimal::from(200),
            advance: Decimal::from(100),
            remainder: Decimal::from(100),
            status: InvoiceStatus::Accepted,
            urssaf_ref: Some("URSSAF-ABCD1234".to_string()),
            message: None,
            created_utc: Utc::now(),
        };
        let company = CompanySettings {
            name: "Domus Premium".to_string(),
            address: "Rennes".to_string(),
            email: "contact@example.com".to_string(),
            phone: "00 00 00 00 00".to_string(),
        };

        let bytes = render_invoice(&invoice, None, &company, &LocaleSettings::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
