use crate::normalize::IdMap;
use crate::record::PasserRecord;

/// Schema statements, emitted before any insert. Deleting a campus or
/// course nulls the reference on its passers rather than cascading.
const SCHEMA: [&str; 3] = [
    "CREATE TABLE campuses (id INT NOT NULL, name VARCHAR(255) NOT NULL, PRIMARY KEY (id));",
    "CREATE TABLE courses (id INT NOT NULL, name VARCHAR(255) NOT NULL, PRIMARY KEY (id));",
    "CREATE TABLE passers (id INT NOT NULL AUTO_INCREMENT, name VARCHAR(255) NOT NULL, \
     campus_id INT, course_id INT, PRIMARY KEY (id), \
     FOREIGN KEY (campus_id) REFERENCES campuses (id) ON DELETE SET NULL, \
     FOREIGN KEY (course_id) REFERENCES courses (id) ON DELETE SET NULL);",
];

/// MySQL escape sequences indexed by code point, built once at compile
/// time; escaping one character is a table lookup.
static ESCAPES: [Option<&str>; 128] = escape_table();

const fn escape_table() -> [Option<&'static str>; 128] {
    let mut table = [None; 128];
    table[0x00] = Some("\\0");
    table[0x0a] = Some("\\n");
    table[0x0d] = Some("\\r");
    table[0x1a] = Some("\\Z");
    table[b'"' as usize] = Some("\\\"");
    table[b'\'' as usize] = Some("\\'");
    table[b'\\' as usize] = Some("\\\\");
    table
}

/// Escape `raw` for embedding in a single-quoted MySQL string literal.
/// Total over all of Unicode: the seven special characters become
/// two-character sequences, everything else (including all non-ASCII)
/// passes through unchanged.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ESCAPES.get(ch as usize).copied().flatten() {
            Some(seq) => out.push_str(seq),
            None => out.push(ch),
        }
    }
    out
}

/// Render the full statement sequence in its required order: schema,
/// campus inserts, course inserts, then one fact row per passer.
///
/// Reference inserts follow map iteration order, which is sorted name
/// order, which is ID order. A passer whose campus was blank or whose
/// course is the pending-case sentinel has no map entry and gets NULL.
/// Only names are escaped; IDs and NULL never come from page text.
pub fn render_statements(
    records: &[PasserRecord],
    campuses: &IdMap,
    courses: &IdMap,
) -> Vec<String> {
    let mut stmts: Vec<String> = SCHEMA.iter().map(|s| s.to_string()).collect();

    for (name, id) in campuses {
        stmts.push(format!(
            "INSERT INTO campuses (id, name) VALUES ({}, '{}');",
            id,
            escape(name)
        ));
    }
    for (name, id) in courses {
        stmts.push(format!(
            "INSERT INTO courses (id, name) VALUES ({}, '{}');",
            id,
            escape(name)
        ));
    }
    for record in records {
        stmts.push(format!(
            "INSERT INTO passers (name, campus_id, course_id) VALUES ('{}', {}, {});",
            escape(&record.name),
            foreign_key(campuses.get(&record.campus)),
            foreign_key(courses.get(&record.course)),
        ));
    }
    stmts
}

/// File body: one statement per line, terminated by a blank line.
pub fn render_file(stmts: &[String]) -> String {
    let mut out = stmts.join("\n");
    out.push_str("\n\n");
    out
}

fn foreign_key(id: Option<&u32>) -> String {
    match id {
        Some(id) => id.to_string(),
        None => "NULL".to_string(),
    }
}

// ── Tests ──
