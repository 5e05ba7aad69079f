use std::borrow::Cow;

/// Minimal CSV writer for downloadable reports.
#[derive(Debug, Default)]
pub struct CsvTable {
    header: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn new(header: Vec<&'static str>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        push_line(&mut out, self.header.iter().copied());
        for row in &self.rows {
            push_line(&mut out, row.iter().map(String::as_str));
        }
        out
    }
}

fn push_line<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    let line = fields.map(escape).collect::<Vec<_>>().join(",");
    out.push_str(&line);
    out.push_str("\r\n");
}

/// Quote fields holding separators, quotes or line breaks.
fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_only_when_needed() {
        let mut table = CsvTable::new(vec!["name", "notes"]);
        table.push(vec!["Doe, John".into(), "said \"hi\"".into()]);
        table.push(vec!["Ann".into(), String::new()]);

        assert_eq!(
            table.render(),
            "name,notes\r\n\"Doe, John\",\"said \"\"hi\"\"\"\r\nAnn,\r\n"
        );
    }
}
