#![allow(dead_code)]

use ieee_paper_generator::paper::{AuthorField, DocumentField, PaperDocument};

/// A paper that passes structural validation.
pub fn complete_document() -> PaperDocument {
    let mut doc = PaperDocument::new();
    doc.set_field(DocumentField::Title("Deterministic Section Numbering".to_string()));
    doc.set_field(DocumentField::Abstract("We describe a small paper generator.".to_string()));
    doc.set_field(DocumentField::Keywords("typesetting, validation, IEEEtran".to_string()));
    doc.set_field(DocumentField::References("\\bibitem{b1} A. Author, Some Book, 2024.".to_string()));

    fill_author(&mut doc, 0, "Ada", "Lovelace");
    doc.set_section_content(0, "This paper shows how sections are numbered.")
        .unwrap();
    doc.set_section_title(1, "Method").unwrap();
    doc.set_section_content(1, "Greedy subtraction over a fixed table.")
        .unwrap();
    doc
}

pub fn fill_author(doc: &mut PaperDocument, index: usize, first: &str, last: &str) {
    let values = [
        (AuthorField::FirstName, first),
        (AuthorField::LastName, last),
        (AuthorField::Department, "Dept. of Computer Science"),
        (AuthorField::Organization, "Example University"),
        (AuthorField::CityCountry, "London, United Kingdom"),
        (AuthorField::Email, "0000-0002-1825-0097"),
    ];
    for (field, value) in values {
        doc.set_author_field(index, field, value).unwrap();
    }
}

/// Bytes that look like a PDF to anyone sniffing magic numbers.
pub fn fake_pdf() -> Vec<u8> {
    b"%PDF-1.5\n% fake paper for tests\n%%EOF\n".to_vec()
}
