use crate::models::PlotPoint;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save plot points as CSV with a `year,value` header.
pub fn save_csv<P: AsRef<Path>>(points: &[PlotPoint], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    for p in points {
        wtr.serialize(p)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save plot points as a pretty JSON array.
pub fn save_json<P: AsRef<Path>>(points: &[PlotPoint], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(points)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        let pts = vec![PlotPoint {
            year: 2000,
            value: 1.23,
        }];
        save_csv(&pts, &csvp).unwrap();
        save_json(&pts, &jsonp).unwrap();
        assert_eq!(
            std::fs::read_to_string(&csvp).unwrap(),
            "year,value\n2000,1.23\n"
        );
        assert!(jsonp.exists());
    }
}
