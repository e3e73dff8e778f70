use anyhow::{Context, Result};
use megafuzzy_db::rusqlite::Connection;
use std::path::Path;

use megafuzzy_db::dataset::parse_record;
use megafuzzy_db::db::insert_draw;
use megafuzzy_db::models::{Draw, DrawRecord};

/// Parses and validates one row, normalizing its date to YYYY-MM-DD.
fn checked_record(record: &csv::StringRecord) -> Result<DrawRecord> {
    let raw = parse_record(record).map_err(anyhow::Error::msg)?;
    let draw = Draw::try_from(raw)?;
    Ok(DrawRecord::from(&draw))
}

#[derive(Debug, Default)]
pub struct ImportResult {
    pub total_records: u32,
    pub inserted: u32,
    pub skipped: u32,
    pub errors: u32,
}

/// Copies a dataset file into the store. Bad rows are counted and skipped,
/// duplicate draw ids are ignored, the rest is committed in one transaction.
pub fn import_csv(conn: &Connection, path: &Path, delimiter: u8) -> Result<ImportResult> {
    let reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Não foi possível abrir {:?}", path))?;
    import_from(conn, reader)
}

fn import_from<R: std::io::Read>(conn: &Connection, mut reader: csv::Reader<R>) -> Result<ImportResult> {
    let tx = conn
        .unchecked_transaction()
        .context("Não foi possível iniciar a transação")?;

    let mut result = ImportResult::default();

    for record_result in reader.records() {
        result.total_records += 1;
        let line = result.total_records + 1;
        let record = match record_result {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(line, error = %e, "unreadable row");
                eprintln!("Erro de leitura na linha {}: {}", line, e);
                result.errors += 1;
                continue;
            }
        };
        match checked_record(&record) {
            Ok(draw) => match insert_draw(&tx, &draw) {
                Ok(true) => result.inserted += 1,
                Ok(false) => result.skipped += 1,
                Err(e) => {
                    eprintln!("Erro ao inserir o concurso {}: {}", draw.draw_id, e);
                    result.errors += 1;
                }
            },
            Err(e) => {
                tracing::warn!(line, error = %e, "rejected row");
                eprintln!("Linha {} rejeitada: {}", line, e);
                result.errors += 1;
            }
        }
    }

    tx.commit().context("Falha no commit")?;
    tracing::info!(
        inserted = result.inserted,
        skipped = result.skipped,
        errors = result.errors,
        "import finished"
    );
    Ok(result)
}
