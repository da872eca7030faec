use crate::engine::IrSystem;
use crate::index::DocId;

/// Expand tabs to the next multiple of 8 columns.
fn expand_tabs(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut col = 0;
    for c in s.chars() {
        if c == '\t' {
            let pad = 8 - col % 8;
            out.extend(std::iter::repeat(' ').take(pad));
            col += pad;
        } else {
            out.push(c);
            col += 1;
        }
    }
    out
}

/// One line per hit: score as a percentage, the document url, and the first 45
/// characters of its title. Hits for unknown ids are skipped.
pub fn present(system: &IrSystem, results: &[(f64, DocId)]) -> Vec<String> {
    results
        .iter()
        .filter_map(|&(score, doc_id)| {
            let doc = system.document(doc_id)?;
            let title: String = doc.title.chars().take(45).collect();
            Some(format!("{:5.2}|{:25} | {}", 100.0 * score, doc.url, expand_tabs(&title)))
        })
        .collect()
}
