use serde::Serialize;

use super::document::{Document, Element};
use super::path::{Path, Resolver};
use crate::core::Field;
use crate::path;
use crate::pdf::{PdfPayload, locate_pdf};

/// Everything displayable from one UBL invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceView {
    pub header: Header,
    pub supplier: PartyView,
    pub customer: PartyView,
    /// One entry per `cac:InvoiceLine`, in document order.
    pub lines: Vec<LineView>,
    pub totals: Totals,
    /// First embedded document with `mimeCode="application/pdf"`, still encoded.
    #[serde(skip)]
    pub pdf: Option<PdfPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub id: Field,
    pub issue_date: Field,
    pub due_date: Field,
    pub type_code: Field,
    pub currency: Field,
    pub buyer_reference: Field,
    pub order_reference: Field,
    pub note: Field,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartyView {
    /// `PartyLegalEntity/RegistrationName`.
    pub name: Field,
    /// `PartyName/Name`.
    pub trading_name: Field,
    pub vat_id: Field,
    pub email: Field,
    pub endpoint_id: Field,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineView {
    pub id: Field,
    pub name: Field,
    pub description: Field,
    pub quantity: Field,
    /// `unitCode` attribute of `InvoicedQuantity`, if present and non-blank.
    pub unit_code: Option<String>,
    pub unit_price: Field,
    pub line_total: Field,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub line_extension: Field,
    pub tax_exclusive: Field,
    pub tax_amount: Field,
    pub tax_inclusive: Field,
    pub payable: Field,
}

impl LineView {
    /// Whether every displayed column resolved.
    pub fn is_complete(&self) -> bool {
        [
            &self.id,
            &self.name,
            &self.quantity,
            &self.unit_price,
            &self.line_total,
        ]
        .iter()
        .all(|f| !f.is_missing())
    }
}

struct PartyPaths {
    name: Path,
    trading_name: Path,
    vat_id: Path,
    email: Path,
    endpoint_id: Path,
}

const SUPPLIER: PartyPaths = PartyPaths {
    name: path!(cac:AccountingSupplierParty/cac:Party/cac:PartyLegalEntity/cbc:RegistrationName),
    trading_name: path!(cac:AccountingSupplierParty/cac:Party/cac:PartyName/cbc:Name),
    vat_id: path!(cac:AccountingSupplierParty/cac:Party/cac:PartyTaxScheme/cbc:CompanyID),
    email: path!(cac:AccountingSupplierParty/cac:Party/cac:Contact/cbc:ElectronicMail),
    endpoint_id: path!(cac:AccountingSupplierParty/cac:Party/cbc:EndpointID),
};

const CUSTOMER: PartyPaths = PartyPaths {
    name: path!(cac:AccountingCustomerParty/cac:Party/cac:PartyLegalEntity/cbc:RegistrationName),
    trading_name: path!(cac:AccountingCustomerParty/cac:Party/cac:PartyName/cbc:Name),
    vat_id: path!(cac:AccountingCustomerParty/cac:Party/cac:PartyTaxScheme/cbc:CompanyID),
    email: path!(cac:AccountingCustomerParty/cac:Party/cac:Contact/cbc:ElectronicMail),
    endpoint_id: path!(cac:AccountingCustomerParty/cac:Party/cbc:EndpointID),
};

const LINE_ID: Path = path!(cbc:ID);
const LINE_ITEM_NAME: Path = path!(cac:Item/cbc:Name);
const LINE_ITEM_DESCRIPTION: Path = path!(cac:Item/cbc:Description);
const LINE_QUANTITY: Path = path!(cbc:InvoicedQuantity);
const LINE_PRICE: Path = path!(cac:Price/cbc:PriceAmount);
const LINE_AMOUNT: Path = path!(cbc:LineExtensionAmount);

/// Project a parsed UBL invoice into its displayable fields.
///
/// Header, party and total fields are resolved against the root element.
/// Line records come from every `cac:InvoiceLine` at any depth. Nothing
/// here fails: unresolved fields are [`Field::Missing`].
pub fn project(document: &Document, resolver: &Resolver) -> InvoiceView {
    let root = document.root();
    let text = |path: &Path| resolver.text(root, path);

    let header = Header {
        id: text(&path!(cbc:ID)),
        issue_date: text(&path!(cbc:IssueDate)),
        due_date: text(&path!(cbc:DueDate)),
        type_code: text(&path!(cbc:InvoiceTypeCode)),
        currency: text(&path!(cbc:DocumentCurrencyCode)),
        buyer_reference: text(&path!(cbc:BuyerReference)),
        order_reference: text(&path!(cac:OrderReference/cbc:ID)),
        note: text(&path!(cbc:Note)),
    };

    let totals = Totals {
        line_extension: text(&path!(cac:LegalMonetaryTotal/cbc:LineExtensionAmount)),
        tax_exclusive: text(&path!(cac:LegalMonetaryTotal/cbc:TaxExclusiveAmount)),
        tax_amount: text(&path!(cac:TaxTotal/cbc:TaxAmount)),
        tax_inclusive: text(&path!(cac:LegalMonetaryTotal/cbc:TaxInclusiveAmount)),
        payable: text(&path!(cac:LegalMonetaryTotal/cbc:PayableAmount)),
    };

    let cac = resolver.namespaces().uri(crate::core::Prefix::Cac);
    let lines: Vec<LineView> = document
        .elements_named(cac, "InvoiceLine")
        .map(|line| project_line(line, resolver))
        .collect();

    let pdf = locate_pdf(document, resolver.namespaces());

    tracing::debug!(
        lines = lines.len(),
        has_pdf = pdf.is_some(),
        "projected invoice"
    );

    InvoiceView {
        header,
        supplier: project_party(root, resolver, &SUPPLIER),
        customer: project_party(root, resolver, &CUSTOMER),
        lines,
        totals,
        pdf,
    }
}

fn project_party(root: &Element, resolver: &Resolver, paths: &PartyPaths) -> PartyView {
    PartyView {
        name: resolver.text(root, &paths.name),
        trading_name: resolver.text(root, &paths.trading_name),
        vat_id: resolver.text(root, &paths.vat_id),
        email: resolver.text(root, &paths.email),
        endpoint_id: resolver.text(root, &paths.endpoint_id),
    }
}

fn project_line(line: &Element, resolver: &Resolver) -> LineView {
    let unit_code = resolver
        .node(line, &LINE_QUANTITY)
        .and_then(|q| q.attribute("unitCode"))
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string);

    LineView {
        id: resolver.text(line, &LINE_ID),
        name: resolver.text(line, &LINE_ITEM_NAME),
        description: resolver.text(line, &LINE_ITEM_DESCRIPTION),
        quantity: resolver.text(line, &LINE_QUANTITY),
        unit_code,
        unit_price: resolver.text(line, &LINE_PRICE),
        line_total: resolver.text(line, &LINE_AMOUNT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ubl_ns;

    fn invoice(body: &str) -> InvoiceView {
        let xml = format!(
            r#"<Invoice xmlns="{}" xmlns:cac="{}" xmlns:cbc="{}">{body}</Invoice>"#,
            ubl_ns::INVOICE,
            ubl_ns::CAC,
            ubl_ns::CBC
        );
        project(&Document::parse(&xml).unwrap(), &Resolver::default())
    }

    #[test]
    fn empty_invoice_is_all_missing() {
        let view = invoice("");
        assert!(view.header.id.is_missing());
        assert!(view.supplier.name.is_missing());
        assert!(view.totals.payable.is_missing());
        assert!(view.lines.is_empty());
        assert!(view.pdf.is_none());
    }

    #[test]
    fn header_fields() {
        let view = invoice(
            "<cbc:ID>INV-1</cbc:ID><cbc:IssueDate>2024-06-15</cbc:IssueDate>\
             <cbc:InvoiceTypeCode>380</cbc:InvoiceTypeCode>\
             <cbc:DocumentCurrencyCode>EUR</cbc:DocumentCurrencyCode>\
             <cac:OrderReference><cbc:ID>PO-7</cbc:ID></cac:OrderReference>",
        );
        assert_eq!(view.header.id.as_str(), Some("INV-1"));
        assert_eq!(view.header.issue_date.as_str(), Some("2024-06-15"));
        assert!(view.header.due_date.is_missing());
        assert_eq!(view.header.type_code.as_str(), Some("380"));
        assert_eq!(view.header.currency.as_str(), Some("EUR"));
        assert_eq!(view.header.order_reference.as_str(), Some("PO-7"));
    }

    #[test]
    fn supplier_and_customer_are_kept_apart() {
        let view = invoice(
            "<cac:AccountingSupplierParty><cac:Party>\
               <cac:PartyLegalEntity><cbc:RegistrationName>Seller</cbc:RegistrationName></cac:PartyLegalEntity>\
             </cac:Party></cac:AccountingSupplierParty>\
             <cac:AccountingCustomerParty><cac:Party>\
               <cac:Contact><cbc:ElectronicMail>buyer@example.com</cbc:ElectronicMail></cac:Contact>\
             </cac:Party></cac:AccountingCustomerParty>",
        );
        assert_eq!(view.supplier.name.as_str(), Some("Seller"));
        assert!(view.supplier.email.is_missing());
        assert!(view.customer.name.is_missing());
        assert_eq!(view.customer.email.as_str(), Some("buyer@example.com"));
    }

    #[test]
    fn lines_found_at_any_depth_in_order() {
        let view = invoice(
            "<cac:InvoiceLine><cbc:ID>1</cbc:ID></cac:InvoiceLine>\
             <cac:Wrapper><cac:InvoiceLine><cbc:ID>2</cbc:ID></cac:InvoiceLine></cac:Wrapper>\
             <cac:InvoiceLine><cbc:ID>3</cbc:ID></cac:InvoiceLine>",
        );
        let ids: Vec<_> = view.lines.iter().map(|l| l.id.display().to_string()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
        assert!(view.lines.iter().all(|l| !l.is_complete()));
    }

    #[test]
    fn line_fields_and_unit_code() {
        let view = invoice(
            r#"<cac:InvoiceLine>
                 <cbc:ID>1</cbc:ID>
                 <cbc:InvoicedQuantity unitCode="HUR">10</cbc:InvoicedQuantity>
                 <cbc:LineExtensionAmount currencyID="EUR">25.00</cbc:LineExtensionAmount>
                 <cac:Item><cbc:Description>Hours</cbc:Description><cbc:Name>Consulting</cbc:Name></cac:Item>
                 <cac:Price><cbc:PriceAmount currencyID="EUR">2.50</cbc:PriceAmount></cac:Price>
               </cac:InvoiceLine>"#,
        );
        let line = &view.lines[0];
        assert_eq!(line.name.as_str(), Some("Consulting"));
        assert_eq!(line.description.as_str(), Some("Hours"));
        assert_eq!(line.unit_code.as_deref(), Some("HUR"));
        assert_eq!(line.unit_price.as_str(), Some("2.50"));
        assert!(line.is_complete());
    }

    #[test]
    fn line_paths_are_relative_to_the_line() {
        // The header ID must not leak into a line that has none.
        let view = invoice("<cbc:ID>INV-1</cbc:ID><cac:InvoiceLine/>");
        assert_eq!(view.lines.len(), 1);
        assert!(view.lines[0].id.is_missing());
        assert!(view.lines[0].unit_code.is_none());
    }
}
