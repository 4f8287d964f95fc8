/// Reader for tab-delimited observation tables (one genome per row, with a header)
use crate::bio::taxonomy::TaxonId;
use crate::{Result, TaxprofError};
use std::io::{BufRead, Lines};

/// One (group, taxon) pair from the input table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub group: String,
    pub taxon_id: TaxonId,
}

/// A tab-delimited table whose first line names the columns.
pub struct TabbedReader<R> {
    lines: Lines<R>,
    headers: Vec<String>,
    lines_read: usize,
}

impl<R: BufRead> TabbedReader<R> {
    /// Open a table and read its header line
    pub fn new(reader: R) -> Result<Self> {
        let mut lines = reader.lines();
        let header = match lines.next() {
            Some(line) => line?,
            None => return Err(TaxprofError::Parse("input has no header line".to_string())),
        };
        let headers = header
            .trim_end_matches('\r')
            .split('\t')
            .map(str::to_string)
            .collect();

        Ok(Self {
            lines,
            headers,
            lines_read: 0,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Resolve a column given either its 1-based position or its header name
    pub fn find_column(&self, column: &str) -> Result<usize> {
        if let Ok(position) = column.parse::<usize>() {
            if position == 0 || position > self.headers.len() {
                return Err(TaxprofError::InvalidInput(format!(
                    "column {} is out of range (table has {} columns)",
                    position,
                    self.headers.len()
                )));
            }
            return Ok(position - 1);
        }

        self.headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| TaxprofError::NotFound(format!("input column '{}'", column)))
    }

    /// Number of data lines consumed so far (the header is not counted)
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Iterate the table as observations drawn from the two given columns
    pub fn observations(self, group_col: usize, taxon_col: usize) -> Observations<R> {
        Observations {
            reader: self,
            group_col,
            taxon_col,
        }
    }

    fn next_row(&mut self) -> Option<Result<String>> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.lines_read += 1;
            let trimmed = line.trim_end_matches('\r');
            if !trimmed.is_empty() {
                return Some(Ok(trimmed.to_string()));
            }
        }
    }
}

/// Iterator over the observations of a [`TabbedReader`]
pub struct Observations<R> {
    reader: TabbedReader<R>,
    group_col: usize,
    taxon_col: usize,
}

impl<R: BufRead> Observations<R> {
    pub fn lines_read(&self) -> usize {
        self.reader.lines_read()
    }

    fn parse_row(&self, row: &str) -> Result<Observation> {
        // Data lines are numbered after the header
        let line_no = self.reader.lines_read + 1;
        let fields: Vec<&str> = row.split('\t').collect();

        let field = |col: usize| {
            fields.get(col).copied().ok_or_else(|| {
                TaxprofError::Parse(format!(
                    "line {}: expected at least {} columns, found {}",
                    line_no,
                    col + 1,
                    fields.len()
                ))
            })
        };

        let group = field(self.group_col)?;
        let taxon = field(self.taxon_col)?;
        let taxon_id = taxon.trim().parse::<u32>().map_err(|_| {
            TaxprofError::Parse(format!("line {}: invalid taxon ID '{}'", line_no, taxon))
        })?;

        Ok(Observation {
            group: group.to_string(),
            taxon_id: TaxonId(taxon_id),
        })
    }
}

impl<R: BufRead> Iterator for Observations<R> {
    type Item = Result<Observation>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = match self.reader.next_row()? {
            Ok(row) => row,
            Err(e) => return Some(Err(e)),
        };
        Some(self.parse_row(&row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TABLE: &str = "genome_id\ttaxon_id\tgroup_id\n\
                         83333.1\t83333\tecoli\n\
                         \n\
                         1280.5\t1280\tstaph\r\n";

    #[test]
    fn test_find_column_by_name_and_position() {
        let reader = TabbedReader::new(Cursor::new(TABLE)).unwrap();
        assert_eq!(reader.headers(), ["genome_id", "taxon_id", "group_id"]);
        assert_eq!(reader.find_column("group_id").unwrap(), 2);
        assert_eq!(reader.find_column("taxon_id").unwrap(), 1);
        assert_eq!(reader.find_column("1").unwrap(), 0);
        assert!(matches!(reader.find_column("4"), Err(TaxprofError::InvalidInput(_))));
        assert!(matches!(reader.find_column("0"), Err(TaxprofError::InvalidInput(_))));
        assert!(matches!(reader.find_column("species"), Err(TaxprofError::NotFound(_))));
    }

    #[test]
    fn test_observations() {
        let reader = TabbedReader::new(Cursor::new(TABLE)).unwrap();
        let mut observations = reader.observations(2, 1);

        let first = observations.next().unwrap().unwrap();
        assert_eq!(first.group, "ecoli");
        assert_eq!(first.taxon_id, TaxonId(83333));

        let second = observations.next().unwrap().unwrap();
        assert_eq!(second.group, "staph");
        assert_eq!(second.taxon_id, TaxonId(1280));

        assert!(observations.next().is_none());
        assert_eq!(observations.lines_read(), 3);
    }

    #[test]
    fn test_empty_input_has_no_header() {
        assert!(matches!(
            TabbedReader::new(Cursor::new("")),
            Err(TaxprofError::Parse(_))
        ));
    }

    #[test]
    fn test_bad_rows_are_errors() {
        let table = "group_id\ttaxon_id\nA\tnot-a-number\nB\n";
        let reader = TabbedReader::new(Cursor::new(table)).unwrap();
        let results: Vec<_> = reader.observations(0, 1).collect();

        assert_eq!(results.len(), 2);
        match &results[0] {
            Err(TaxprofError::Parse(msg)) => assert!(msg.contains("line 2"), "{}", msg),
            other => panic!("unexpected result: {:?}", other),
        }
        match &results[1] {
            Err(TaxprofError::Parse(msg)) => assert!(msg.contains("line 3"), "{}", msg),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
