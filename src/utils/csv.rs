//! Bootstrap CSV parsing.
//!
//! Row shape: draw_number, date (DD/MM/YYYY), number1..number6, strong_number,
//! then any trailing columns, which are ignored. The first line is a header.
//! Malformed rows are logged and skipped; they never abort the import.

use crate::models::NewDraw;

#[derive(Debug, Default)]
pub struct CsvParseOutcome {
    pub draws: Vec<NewDraw>,
    pub skipped: usize,
}

pub fn parse_draws_csv(content: &str) -> CsvParseOutcome {
    // strip a UTF-8 BOM so exported spreadsheets parse cleanly
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut outcome = CsvParseOutcome::default();
    for (idx, line) in content.lines().enumerate() {
        if idx == 0 {
            continue;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_row(line) {
            Some(draw) => outcome.draws.push(draw),
            None => {
                log::warn!("Skipping malformed CSV row {}: {line}", idx + 1);
                outcome.skipped += 1;
            }
        }
    }
    outcome
}

fn parse_row(line: &str) -> Option<NewDraw> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 9 {
        return None;
    }

    let draw_number = fields[0].parse::<i64>().ok()?;
    let draw_date = fields[1].to_string();
    let numbers = fields[2..8]
        .iter()
        .map(|f| f.parse::<i32>().ok())
        .collect::<Option<Vec<i32>>>()?;
    let strong_number = fields[8].parse::<i32>().ok()?;

    Some(NewDraw {
        draw_number,
        draw_date,
        numbers,
        strong_number,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
draw,date,n1,n2,n3,n4,n5,n6,strong,extra1,extra2
3878,16/12/2025,3,9,14,22,30,36,5,x,y
3877,13/12/2025,1,5,17,20,28,33,2,x,y
";

    #[test]
    fn test_parse_draws_csv() {
        let outcome = parse_draws_csv(SAMPLE);
        assert_eq!(outcome.draws.len(), 2);
        assert_eq!(outcome.skipped, 0);
        assert_eq!(outcome.draws[0].draw_number, 3878);
        assert_eq!(outcome.draws[0].draw_date, "16/12/2025");
        assert_eq!(outcome.draws[0].numbers, vec![3, 9, 14, 22, 30, 36]);
        assert_eq!(outcome.draws[0].strong_number, 5);
    }

    #[test]
    fn test_parse_draws_csv_skips_bad_rows() {
        let content = "header\n3878,16/12/2025,3,9,14,22,30,36,5\nnot,a,row\n\n";
        let outcome = parse_draws_csv(content);
        assert_eq!(outcome.draws.len(), 1);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn test_parse_draws_csv_strips_bom() {
        let content = format!("\u{feff}header\n3878,16/12/2025,3,9,14,22,30,36,5");
        let outcome = parse_draws_csv(&content);
        assert_eq!(outcome.draws.len(), 1);
    }
}
