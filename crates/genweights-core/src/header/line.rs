//! Line shapes of the `initrwgt` header.
//!
//! Each matcher searches for its shape anywhere inside a line (not a full
//! match) and hands back borrowed captures; numbers are left as text so the
//! parser decides what a bad number means. Quoted captures and the scale
//! label are greedy.
//!
//! ```text
//! group-open  := <weightgroup combine="X" name="Y">
//! group-close := </weightgroup>
//! scale-entry := <weight id="N"> muR=R muF=F [text] </weight>
//! pdf-entry   := <weight id="N"> PDF set = L </weight>
//! ```

use std::sync::LazyLock;

use regex::Regex;

const GROUP_CLOSE: &str = "</weightgroup>";

static GROUP_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<weightgroup\s+combine="(.*)"\s+name="(.*)"\s*>"#)
        .expect("weightgroup pattern")
});

static SCALE_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<weight\s+id="(\d+)">\s*(muR=(\S+)\s+muF=(\S+)(\s+.*)?)</weight>"#)
        .expect("scale weight pattern")
});

static PDF_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<weight\s+id="(\d+)">\s*PDF set\s*=\s*(\d+)\s*</weight>"#)
        .expect("pdf weight pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupOpen<'a> {
    pub combine: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleEntry<'a> {
    pub id: &'a str,
    /// Everything from `muR=` up to the last `</weight>`.
    pub label: &'a str,
    pub mu_r: &'a str,
    pub mu_f: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdfEntry<'a> {
    pub id: &'a str,
    pub lha_id: &'a str,
}

pub fn group_open(line: &str) -> Option<GroupOpen<'_>> {
    let caps = GROUP_OPEN.captures(line)?;
    Some(GroupOpen {
        combine: caps.get(1)?.as_str(),
        name: caps.get(2)?.as_str(),
    })
}

pub fn is_group_close(line: &str) -> bool {
    line.contains(GROUP_CLOSE)
}

pub fn scale_entry(line: &str) -> Option<ScaleEntry<'_>> {
    let caps = SCALE_ENTRY.captures(line)?;
    Some(ScaleEntry {
        id: caps.get(1)?.as_str(),
        label: caps.get(2)?.as_str(),
        mu_r: caps.get(3)?.as_str(),
        mu_f: caps.get(4)?.as_str(),
    })
}

pub fn pdf_entry(line: &str) -> Option<PdfEntry<'_>> {
    let caps = PDF_ENTRY.captures(line)?;
    Some(PdfEntry {
        id: caps.get(1)?.as_str(),
        lha_id: caps.get(2)?.as_str(),
    })
}
