//! Emotion perception study analysis.
//!
//! Tallies how participants labeled acted emotion recordings against the
//! emotions actually expressed, prints the count and normalized tables
//! plus a classification report, and renders the rectangular normalized
//! matrix as an annotated heatmap.
//!
//! Run with: cargo run --example emotion_study

use emomat::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Order the five emotions were performed in within each session.
const STIMULUS_ORDER: [&str; 5] = ["Sad", "Calm", "Angry", "Neutral", "Curious"];

/// Row order for the rectangular figure: the genuinely expressed emotions.
const EXPRESSED: [&str; 5] = ["Sad", "Neutral", "Calm", "Curious", "Angry"];

/// Every emotion participants could answer with.
const ANSWER_OPTIONS: [&str; 7] = [
    "Sad", "Neutral", "Calm", "Curious", "Angry", "Happy", "Scared",
];

/// Participant answers, one session per row, answering the stimuli in
/// [`STIMULUS_ORDER`].
const RESPONSES: [[&str; 5]; 14] = [
    ["Neutral", "Calm", "Angry", "Sad", "Scared"],
    ["Scared", "Curious", "Angry", "Sad", "Angry"],
    ["Neutral", "Curious", "Angry", "Happy", "Scared"],
    ["Scared", "Neutral", "Angry", "Calm", "Curious"],
    ["Sad", "Calm", "Angry", "Calm", "Curious"],
    ["Sad", "Calm", "Angry", "Neutral", "Sad"],
    ["Sad", "Calm", "Angry", "Calm", "Scared"],
    ["Neutral", "Sad", "Angry", "Calm", "Neutral"],
    ["Calm", "Curious", "Angry", "Scared", "Neutral"],
    ["Neutral", "Scared", "Angry", "Neutral", "Happy"],
    ["Sad", "Calm", "Angry", "Neutral", "Scared"],
    ["Sad", "Neutral", "Angry", "Calm", "Curious"],
    ["Sad", "Curious", "Angry", "Curious", "Happy"],
    ["Sad", "Calm", "Angry", "Sad", "Scared"],
];

/// Flatten the sessions into parallel true/predicted label sequences.
fn study_samples() -> (Vec<&'static str>, Vec<&'static str>) {
    let mut y_true = Vec::with_capacity(RESPONSES.len() * STIMULUS_ORDER.len());
    let mut y_pred = Vec::with_capacity(RESPONSES.len() * STIMULUS_ORDER.len());
    for answers in &RESPONSES {
        y_true.extend_from_slice(&STIMULUS_ORDER);
        y_pred.extend_from_slice(answers);
    }
    (y_true, y_pred)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let expressed = Vocabulary::new(EXPRESSED)?;
    let options = Vocabulary::new(ANSWER_OPTIONS)?;
    let (y_true, y_pred) = study_samples();

    // Square table over every answer option
    let counts = confusion_matrix(&y_true, &y_pred, &options)?;
    println!("Confusion matrix (counts):");
    println!("{}", counts.to_string_table());

    let normalized = counts.normalized();
    println!("Confusion matrix (normalized):");
    println!("{}", normalized.to_string_table());

    // Rectangular form: only expressed emotions keep a row
    let rectangular = normalized.restrict_rows(&expressed)?;
    println!("Confusion matrix (normalized, expressed rows only):");
    println!("{}", rectangular.to_string_table());

    let report = ClassificationReport::from_matrix(&counts)?;
    println!("{}", report.to_string_table());
    if let Some(worst) = report.worst_label() {
        println!("Hardest emotion to convey: {} (F1 {:.2})", worst.label, worst.f1);
    }
    if let Some(best) = report.best_label() {
        println!("Clearest emotion: {} (F1 {:.2})", best.label, best.f1);
    }

    render_heatmap(
        &rectangular,
        "Expressed Emotions vs. Predicted Emotions",
        &HeatmapStyle::default(),
        "emotion_confusion.png",
    )?;
    println!("\nWrote heatmap to emotion_confusion.png");

    Ok(())
}
