mod display;
mod import;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::display::{
    display_config, display_dataset_info, display_draws, display_import_summary,
    display_recommendation, display_score_chart, display_score_detail, display_score_table,
    display_weights,
};
use megafuzzy_db::dataset::DEFAULT_DELIMITER;
use megafuzzy_db::db::{count_draws, default_db_path, fetch_all_draws, fetch_last_draws, migrate, open_db};
use megafuzzy_engine::engine::default_config;
use megafuzzy_engine::features::Variable;
use megafuzzy_engine::fuzzy::Defuzzification;
use megafuzzy_engine::report::{RecommendationRequest, DEFAULT_POOL_N, DEFAULT_TOP_N};
use megafuzzy_engine::weights::Weights;
use megafuzzy_engine::ScoringEngine;

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum DefuzzMethod {
    #[default]
    Grid,
    Area,
}

impl From<DefuzzMethod> for Defuzzification {
    fn from(method: DefuzzMethod) -> Self {
        match method {
            DefuzzMethod::Grid => Defuzzification::GridCentroid,
            DefuzzMethod::Area => Defuzzification::AreaCentroid,
        }
    }
}

#[derive(Parser)]
#[command(name = "megafuzzy", about = "Pontuação fuzzy das dezenas da Mega-Sena")]
struct Cli {
    /// Caminho da base SQLite
    #[arg(long, env = "MEGAFUZZY_DB", global = true)]
    db: Option<PathBuf>,

    /// Nível de log (sobrescrito por RUST_LOG)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

/// Where the draw history comes from.
#[derive(Args, Debug, Clone, Default)]
struct SourceArgs {
    /// Ler os concursos diretamente de um arquivo CSV em vez da base
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Separador de campos do CSV
    #[arg(long, default_value_t = DEFAULT_DELIMITER as char)]
    delimiter: char,
}

#[derive(Args, Debug, Clone, Default)]
struct WeightArgs {
    /// Arquivo JSON com os cinco pesos (chaves ausentes = 50)
    #[arg(long)]
    weights: Option<PathBuf>,

    /// Peso da frequência histórica (0-100)
    #[arg(long)]
    frequencia_historica: Option<f64>,

    /// Peso do tempo de ausência (0-100)
    #[arg(long)]
    tempo_ausencia: Option<f64>,

    /// Peso da distribuição posicional (0-100)
    #[arg(long)]
    distribuicao_posicional: Option<f64>,

    /// Peso do equilíbrio par/ímpar (0-100)
    #[arg(long)]
    equilibrio_par_impar: Option<f64>,

    /// Peso da tendência de soma (0-100)
    #[arg(long)]
    tendencia_soma: Option<f64>,
}

impl WeightArgs {
    /// File first, then individual flags on top. Range checks are left to the engine.
    fn resolve(&self) -> Result<Weights> {
        let mut weights = match &self.weights {
            Some(path) => load_weights(path)?,
            None => Weights::default(),
        };
        let overrides = [
            (Variable::FrequenciaHistorica, self.frequencia_historica),
            (Variable::TempoAusencia, self.tempo_ausencia),
            (Variable::DistribuicaoPosicional, self.distribuicao_posicional),
            (Variable::EquilibrioParImpar, self.equilibrio_par_impar),
            (Variable::TendenciaSoma, self.tendencia_soma),
        ];
        for (variable, value) in overrides {
            if let Some(value) = value {
                weights.set(variable, value);
            }
        }
        Ok(weights)
    }
}

fn load_weights(path: &Path) -> Result<Weights> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Não foi possível ler {:?}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("Pesos inválidos em {:?}", path))
}

#[derive(Subcommand)]
enum Command {
    /// Importar concursos de um arquivo CSV para a base
    Import {
        /// Caminho do arquivo CSV
        #[arg(short, long)]
        file: PathBuf,

        /// Separador de campos
        #[arg(long, default_value_t = DEFAULT_DELIMITER as char)]
        delimiter: char,
    },

    /// Mostrar o caminho da base de dados
    DbPath,

    /// Listar os últimos concursos
    List {
        /// Número de concursos a exibir
        #[arg(short, long, default_value = "10")]
        last: u32,
    },

    /// Resumo do histórico carregado
    Info {
        #[command(flatten)]
        source: SourceArgs,

        #[arg(long)]
        json: bool,
    },

    /// Variáveis e pesos padrão
    Config {
        #[arg(long)]
        json: bool,
    },

    /// Tabela de variáveis e scores das 60 dezenas
    Features {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        weights: WeightArgs,

        #[arg(long, value_enum, default_value_t = DefuzzMethod::Grid)]
        defuzz: DefuzzMethod,
    },

    /// Detalhar o score de uma dezena (pertinências e regras)
    Score {
        /// Dezena (1-60)
        number: u8,

        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        weights: WeightArgs,

        #[arg(long, value_enum, default_value_t = DefuzzMethod::Grid)]
        defuzz: DefuzzMethod,
    },

    /// Recomendar dezenas
    Recommend {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        weights: WeightArgs,

        /// Quantidade de dezenas principais (1-20)
        #[arg(short, long, default_value_t = DEFAULT_TOP_N)]
        top: usize,

        /// Tamanho do pool (1-30, >= top)
        #[arg(short, long, default_value_t = DEFAULT_POOL_N)]
        pool: usize,

        #[arg(long, value_enum, default_value_t = DefuzzMethod::Grid)]
        defuzz: DefuzzMethod,

        /// Saída em JSON
        #[arg(long)]
        json: bool,

        /// Gráfico dos 60 scores
        #[arg(long)]
        chart: bool,
    },
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let path = cli.db.clone().unwrap_or_else(default_db_path);

    match cli.command {
        Command::DbPath => {
            println!("{}", path.display());
            Ok(())
        }
        Command::Config { json } => cmd_config(json),
        Command::Import { file, delimiter } => cmd_import(&path, &file, delimiter),
        Command::List { last } => cmd_list(&path, last),
        Command::Info { source, json } => cmd_info(&path, &source, json),
        Command::Features {
            source,
            weights,
            defuzz,
        } => cmd_features(&path, &source, &weights, defuzz),
        Command::Score {
            number,
            source,
            weights,
            defuzz,
        } => cmd_score(&path, number, &source, &weights, defuzz),
        Command::Recommend {
            source,
            weights,
            top,
            pool,
            defuzz,
            json,
            chart,
        } => cmd_recommend(&path, &source, &weights, top, pool, defuzz, json, chart),
    }
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .with_context(|| format!("Separador inválido: '{}'", delimiter))
}

fn open_store(path: &Path) -> Result<megafuzzy_db::rusqlite::Connection> {
    let conn = open_db(path)?;
    migrate(&conn)?;
    Ok(conn)
}

/// Builds the engine from `--csv` or from the store. `None` when the store is empty.
fn load_engine(db: &Path, source: &SourceArgs) -> Result<Option<ScoringEngine>> {
    if let Some(csv) = &source.csv {
        let engine = ScoringEngine::from_csv(csv, delimiter_byte(source.delimiter)?)?;
        return Ok(Some(engine));
    }

    let conn = open_store(db)?;
    if count_draws(&conn)? == 0 {
        println!("Base vazia. Execute primeiro: megafuzzy import --file <arquivo.csv>");
        return Ok(None);
    }
    let records = fetch_all_draws(&conn)?;
    Ok(Some(ScoringEngine::from_records(records)?))
}

fn cmd_import(db: &Path, file: &Path, delimiter: char) -> Result<()> {
    let conn = open_store(db)?;
    let result = import::import_csv(&conn, file, delimiter_byte(delimiter)?)?;
    display_import_summary(&result);
    Ok(())
}

fn cmd_list(db: &Path, last: u32) -> Result<()> {
    let conn = open_store(db)?;
    if count_draws(&conn)? == 0 {
        println!("Base vazia. Execute primeiro: megafuzzy import --file <arquivo.csv>");
        return Ok(());
    }
    let draws = fetch_last_draws(&conn, last)?;
    display_draws(&draws);
    Ok(())
}

fn cmd_info(db: &Path, source: &SourceArgs, json: bool) -> Result<()> {
    let Some(engine) = load_engine(db, source)? else {
        return Ok(());
    };
    let info = engine.dataset_info();
    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        display_dataset_info(&info);
    }
    Ok(())
}

fn cmd_config(json: bool) -> Result<()> {
    let config = default_config();
    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        display_config(&config);
    }
    Ok(())
}

fn cmd_features(db: &Path, source: &SourceArgs, weight_args: &WeightArgs, defuzz: DefuzzMethod) -> Result<()> {
    let weights = weight_args.resolve()?;
    weights.validate()?;
    let Some(engine) = load_engine(db, source)? else {
        return Ok(());
    };
    let engine = engine.with_defuzzification(defuzz.into());

    display_weights(&weights);
    display_score_table(&engine.ranked(&weights));
    Ok(())
}

fn cmd_score(
    db: &Path,
    number: u8,
    source: &SourceArgs,
    weight_args: &WeightArgs,
    defuzz: DefuzzMethod,
) -> Result<()> {
    let weights = weight_args.resolve()?;
    let Some(engine) = load_engine(db, source)? else {
        return Ok(());
    };
    let engine = engine.with_defuzzification(defuzz.into());

    let row = engine.score_number(number, &weights)?;
    display_weights(&weights);
    display_score_detail(&row, engine.system());
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_recommend(
    db: &Path,
    source: &SourceArgs,
    weight_args: &WeightArgs,
    top: usize,
    pool: usize,
    defuzz: DefuzzMethod,
    json: bool,
    chart: bool,
) -> Result<()> {
    let request = RecommendationRequest::new(weight_args.resolve()?, top, pool);
    request.validate()?;
    let Some(engine) = load_engine(db, source)? else {
        return Ok(());
    };
    let engine = engine.with_defuzzification(defuzz.into());

    let rec = engine.compute_recommendations(&request)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&rec)?);
        return Ok(());
    }

    display_weights(&request.weights);
    display_recommendation(&rec);
    if chart {
        display_score_chart(&rec.chart_data.all_scores);
    }
    Ok(())
}
