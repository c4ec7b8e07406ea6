use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use peppol_interpreter::path;
use peppol_interpreter::pdf::decode_base64;
use peppol_interpreter::ubl::{Document, Resolver, interpret_str, project};

fn build_invoice_xml(lines: usize) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ubl:Invoice xmlns:ubl="urn:oasis:names:specification:ubl:schema:xsd:Invoice-2"
  xmlns:cac="urn:oasis:names:specification:ubl:schema:xsd:CommonAggregateComponents-2"
  xmlns:cbc="urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2">
  <cbc:ID>BENCH-001</cbc:ID>
  <cbc:IssueDate>2024-06-15</cbc:IssueDate>
  <cbc:DocumentCurrencyCode>EUR</cbc:DocumentCurrencyCode>
  <cac:AccountingSupplierParty><cac:Party>
    <cac:PartyLegalEntity><cbc:RegistrationName>Benchmark GmbH</cbc:RegistrationName></cac:PartyLegalEntity>
  </cac:Party></cac:AccountingSupplierParty>
"#,
    );
    for i in 1..=lines {
        xml.push_str(&format!(
            r#"  <cac:InvoiceLine>
    <cbc:ID>{i}</cbc:ID>
    <cbc:InvoicedQuantity unitCode="HUR">5</cbc:InvoicedQuantity>
    <cbc:LineExtensionAmount currencyID="EUR">600.00</cbc:LineExtensionAmount>
    <cac:Item><cbc:Name>Service item {i}</cbc:Name></cac:Item>
    <cac:Price><cbc:PriceAmount currencyID="EUR">120.00</cbc:PriceAmount></cac:Price>
  </cac:InvoiceLine>
"#
        ));
    }
    xml.push_str("</ubl:Invoice>\n");
    xml
}

fn wrapped_base64(len: usize) -> String {
    let data: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
    let encoded = STANDARD.encode(data);
    encoded
        .as_bytes()
        .chunks(76)
        .map(|c| std::str::from_utf8(c).unwrap())
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_parse(c: &mut Criterion) {
    let xml = build_invoice_xml(10);
    c.bench_function("parse_10_lines", |b| {
        b.iter(|| black_box(Document::parse(black_box(&xml))));
    });
}

fn bench_project(c: &mut Criterion) {
    let xml = build_invoice_xml(10);
    let doc = Document::parse(&xml).unwrap();
    let resolver = Resolver::default();
    c.bench_function("project_10_lines", |b| {
        b.iter(|| black_box(project(black_box(&doc), &resolver)));
    });
}

fn bench_resolve_path(c: &mut Criterion) {
    let xml = build_invoice_xml(10);
    let doc = Document::parse(&xml).unwrap();
    let resolver = Resolver::default();
    let path = path!(cac:AccountingSupplierParty/cac:Party/cac:PartyLegalEntity/cbc:RegistrationName);
    c.bench_function("resolve_party_name", |b| {
        b.iter(|| black_box(resolver.text(doc.root(), black_box(&path))));
    });
}

fn bench_interpret_1000_lines(c: &mut Criterion) {
    let xml = build_invoice_xml(1000);
    c.bench_function("interpret_1000_lines", |b| {
        b.iter(|| black_box(interpret_str(black_box(&xml))));
    });
}

fn bench_decode_pdf(c: &mut Criterion) {
    let text = wrapped_base64(1024 * 1024);
    c.bench_function("decode_base64_1mb", |b| {
        b.iter(|| black_box(decode_base64(black_box(&text))));
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_project,
    bench_resolve_path,
    bench_interpret_1000_lines,
    bench_decode_pdf,
);
criterion_main!(benches);
