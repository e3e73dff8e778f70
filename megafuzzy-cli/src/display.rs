use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use textplots::Plot;

use crate::import::ImportResult;
use megafuzzy_db::models::DrawRecord;
use megafuzzy_engine::engine::{DatasetInfo, DefaultConfig, ScoredNumber};
use megafuzzy_engine::features::Variable;
use megafuzzy_engine::fuzzy::FuzzySystem;
use megafuzzy_engine::report::{NumberScore, Recommendation, DECADE_LABELS, SCORE_BUCKET_LABELS};
use megafuzzy_engine::weights::Weights;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn score_color(score: f64) -> Color {
    if score >= 6.0 {
        Color::Green
    } else if score >= 2.0 {
        Color::Yellow
    } else if score > 0.0 {
        Color::White
    } else {
        Color::DarkGrey
    }
}

fn join_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

pub fn display_draws(draws: &[DrawRecord]) {
    if draws.is_empty() {
        println!("Nenhum concurso para exibir.");
        return;
    }

    let mut table = new_table();
    table.set_header(vec!["Concurso", "Data", "Dezenas (ordem do sorteio)", "Ordenadas"]);

    for draw in draws {
        let mut sorted = draw.numbers.clone();
        sorted.sort();
        table.add_row(vec![
            draw.draw_id.to_string(),
            draw.date.clone(),
            join_numbers(&draw.numbers),
            join_numbers(&sorted),
        ]);
    }

    println!("{table}");
}

fn import_summary(result: &ImportResult) -> String {
    let mut lines = vec![
        "Importação concluída:".to_string(),
        format!("  Linhas lidas:         {}", result.total_records),
        format!("  Inseridos:            {}", result.inserted),
        format!("  Duplicados ignorados: {}", result.skipped),
    ];
    if result.errors > 0 {
        lines.push(format!("  Erros:                {}", result.errors));
    }
    lines.join("\n")
}

pub fn display_import_summary(result: &ImportResult) {
    println!("{}", import_summary(result));
}

pub fn display_dataset_info(info: &DatasetInfo) {
    let mut table = new_table();
    table.set_header(vec!["Campo", "Valor"]);
    table.add_row(vec!["Concursos".to_string(), info.total_draws.to_string()]);
    table.add_row(vec!["Primeira data".to_string(), info.earliest_date.to_string()]);
    table.add_row(vec!["Última data".to_string(), info.latest_date.to_string()]);
    table.add_row(vec!["Dezenas".to_string(), info.total_numbers.to_string()]);
    println!("{table}");
}

pub fn display_config(config: &DefaultConfig) {
    let mut table = new_table();
    table.set_header(vec!["Variável", "Descrição", "Peso padrão"]);
    for variable in Variable::ALL {
        let info = &config.variables[variable.index()];
        table.add_row(vec![
            info.name.to_string(),
            info.description.to_string(),
            format!("{:.0}", config.default_weights.get(variable)),
        ]);
    }
    println!("{table}");
}

fn weights_summary(weights: &Weights) -> String {
    let summary = Variable::ALL
        .iter()
        .map(|&v| format!("{}={:.0}", v.name(), weights.get(v)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("Pesos: {}", summary)
}

pub fn display_weights(weights: &Weights) {
    println!("{}", weights_summary(weights));
}

/// Score table: raw features, weighted inputs and score for each number.
pub fn display_score_table(rows: &[ScoredNumber]) {
    let mut table = new_table();
    table.set_header(vec![
        "#", "Dezena", "Freq.", "Ausência (dias)", "Freq. %", "Ausência %", "Posicional", "Par/Ímpar",
        "Soma", "Score",
    ]);

    for (rank, row) in rows.iter().enumerate() {
        let f = &row.features;
        let x = row.inputs;
        let score = if row.result.is_fallback() {
            Cell::new("—").fg(Color::DarkGrey)
        } else {
            Cell::new(format!("{:.4}", row.score())).fg(score_color(row.score()))
        };
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(format!("{:2}", f.number)),
            Cell::new(f.frequency_raw),
            Cell::new(f.absence_days_raw),
            Cell::new(format!("{:.1}", x.get(Variable::FrequenciaHistorica))),
            Cell::new(format!("{:.1}", x.get(Variable::TempoAusencia))),
            Cell::new(format!("{:.1}", x.get(Variable::DistribuicaoPosicional))),
            Cell::new(format!("{:.1}", x.get(Variable::EquilibrioParImpar))),
            Cell::new(format!("{:.1}", x.get(Variable::TendenciaSoma))),
            score,
        ]);
    }
    println!("{table}");
}

/// Memberships of each input and the firing strength of every rule.
pub fn display_score_detail(row: &ScoredNumber, system: &FuzzySystem) {
    println!("\n── Dezena {} ──\n", row.number());

    let memberships = system.fuzzify(&row.inputs);
    let mut table = new_table();
    table.set_header(vec!["Variável", "Valor", "Termos"]);
    for variable in Variable::ALL {
        let fuzzy = system.antecedent(variable);
        let terms = fuzzy
            .terms
            .iter()
            .zip(&memberships[variable.index()])
            .map(|(term, mu)| format!("{}={:.3}", term.label, mu))
            .collect::<Vec<_>>()
            .join("  ");
        table.add_row(vec![
            variable.name().to_string(),
            format!("{:.2}", row.inputs.get(variable)),
            terms,
        ]);
    }
    println!("{table}");

    let consequent = system.consequent();
    let mut table = new_table();
    table.set_header(vec!["Regra", "Condições", "Conclusão", "Força"]);
    for (i, (rule, strength)) in system.rules().iter().zip(&row.rule_strengths).enumerate() {
        let conditions = rule
            .conditions
            .iter()
            .map(|(v, level)| format!("{}={}", v.name(), system.antecedent(*v).terms[level.index()].label))
            .collect::<Vec<_>>()
            .join(" E ");
        let color = if *strength > 0.0 { Color::Green } else { Color::DarkGrey };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(conditions),
            Cell::new(consequent.terms[rule.consequent.index()].label),
            Cell::new(format!("{:.3}", strength)).fg(color),
        ]);
    }
    println!("{table}");

    if row.result.is_fallback() {
        println!("Nenhuma regra disparou: score = 0");
    } else {
        println!("Score: {:.4}", row.score());
    }
}

pub fn display_recommendation(rec: &Recommendation) {
    println!("\n🎯 Dezenas recomendadas\n");
    let mut table = new_table();
    table.set_header(vec!["#", "Dezena", "Score"]);
    for (i, s) in rec.principal.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(format!("{:2}", s.number)),
            Cell::new(format!("{:.4}", s.score)).fg(score_color(s.score)),
        ]);
    }
    println!("{table}");

    println!("Pool ({}): {}", rec.pool.len(), join_numbers(&rec.pool));

    let stats = &rec.statistics;
    println!("\n📊 Estatísticas\n");
    let mut table = new_table();
    table.set_header(vec!["Métrica", "Valor"]);
    table.add_row(vec!["Soma".to_string(), stats.sum.to_string()]);
    table.add_row(vec!["Pares".to_string(), stats.even_count.to_string()]);
    table.add_row(vec!["Ímpares".to_string(), stats.odd_count.to_string()]);
    table.add_row(vec!["Média dos scores".to_string(), format!("{:.4}", stats.mean_score)]);
    table.add_row(vec!["Desvio padrão".to_string(), format!("{:.4}", stats.std_dev)]);
    table.add_row(vec![
        "Sem regra disparada".to_string(),
        rec.fallback_count.to_string(),
    ]);
    println!("{table}");

    let mut table = new_table();
    table.set_header(DECADE_LABELS.to_vec());
    table.add_row(stats.decades.iter().map(|c| c.to_string()).collect::<Vec<_>>());
    println!("{table}");

    let mut table = new_table();
    table.set_header(SCORE_BUCKET_LABELS.to_vec());
    table.add_row(
        rec.chart_data
            .score_distribution
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>(),
    );
    println!("{table}");
}

/// Score of each number, by number.
pub fn display_score_chart(scores: &[NumberScore]) {
    if scores.is_empty() {
        println!("  (Sem dados para exibir)");
        return;
    }
    let mut points: Vec<(f32, f32)> = scores
        .iter()
        .map(|s| (s.number as f32, s.score as f32))
        .collect();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));

    println!("\n== Score por dezena ==\n");
    let shape = textplots::Shape::Bars(&points);
    let mut chart = textplots::Chart::new_with_y_range(120, 40, 1.0, 60.0, 0.0, 10.0);
    println!("{}", chart.lineplot(&shape));
}
