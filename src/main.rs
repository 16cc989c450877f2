#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use eframe::{App, NativeOptions};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bias_decoder::cli::{read_input, run_analyze, AnalyzeOptions, DictionarySource};
use bias_decoder::config::{self, Config};
use bias_decoder::parsing::dictionary_parser::DictionaryLoad;
use bias_decoder::report::{save_report_json, AnalysisReport};
use bias_decoder::{AnalysisSession, DictionaryEntry, Segment, Severity, ViewState};

const EXPORT_FILE_NAME: &str = "bias_report.json";

#[derive(Parser, Debug)]
#[command(name = "bias-decoder", version, about = "Flags biased wording in job descriptions")]
struct Cli {
    /// Path to the TOML config; defaults apply when it does not exist
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Dictionary JSON to use instead of the configured one
    #[arg(long)]
    dictionary: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a text file ("-" for stdin) and print the report
    Analyze {
        input: PathBuf,

        /// Print the full report as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Also write the JSON report to this path
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// --- Desktop viewer ---

struct BiasDecoderApp {
    dictionary: Vec<DictionaryEntry>,
    dictionary_status: String,
    session: AnalysisSession,
    status_message: Option<String>,
}

impl BiasDecoderApp {
    fn new(_cc: &eframe::CreationContext<'_>, config: &Config, load: DictionaryLoad, dictionary_status: String) -> Self {
        Self {
            dictionary: load.entries,
            dictionary_status,
            session: AnalysisSession::new(config.max_input_chars),
            status_message: None,
        }
    }

    fn export_report(&mut self) {
        if self.session.view() != ViewState::Analyzed {
            self.status_message = Some("Analyze some text before exporting.".to_string());
            return;
        }
        let report = AnalysisReport::build(self.session.input_text(), &self.dictionary);
        self.status_message = Some(match save_report_json(&report, Path::new(EXPORT_FILE_NAME)) {
            Ok(()) => format!("Report saved to {}", EXPORT_FILE_NAME),
            Err(e) => {
                error!(error = %e, "report export failed");
                format!("Export failed: {}", e)
            }
        });
    }

    fn input_view(&mut self, ui: &mut egui::Ui) {
        ui.heading("Input Text");
        ui.separator();
        let char_limit = self.session.max_input_chars();
        egui::ScrollArea::vertical()
            .id_source("input_scroll")
            .max_height((ui.available_height() - 48.0).max(120.0))
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(self.session.input_text_mut())
                        .font(egui::TextStyle::Monospace)
                        .hint_text("Paste your job description here (Ctrl+V)...")
                        .char_limit(char_limit)
                        .desired_rows(24)
                        .desired_width(f32::INFINITY),
                );
            });
        self.session.clamp_input();

        ui.separator();
        ui.horizontal(|ui| {
            ui.weak("Analysis runs locally. No data leaves your machine.");
            if ui
                .add_enabled(self.session.can_analyze(), egui::Button::new("Analyze Text"))
                .clicked()
            {
                self.session.analyze(&self.dictionary);
                self.status_message = None;
            }
        });
    }

    fn decoded_view(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Decoded Text");
            if ui.link("Edit Original Text").clicked() {
                self.session.reset();
            }
        });
        ui.separator();
        egui::ScrollArea::vertical().id_source("decoded_scroll").show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing = egui::vec2(0.0, 2.0);
                for segment in self.session.segments() {
                    segment_labels(ui, segment);
                }
            });
        });
    }

    fn report_panel(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Analysis Report");
            if self.session.view() == ViewState::Analyzed {
                ui.label(format!("{} Issues Found", self.session.summary().issues));
            }
        });
        ui.separator();

        egui::ScrollArea::vertical().id_source("report_scroll").show(ui, |ui| {
            if self.session.view() == ViewState::Input {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.heading("Ready to Decode");
                    ui.label("Paste your text on the left and hit Analyze to see potential biases and suggested alternatives.");
                });
                return;
            }
            if self.session.results().is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.colored_label(egui::Color32::from_rgb(74, 222, 128), "No Biases Detected!");
                    ui.label("Great job! We didn't find any flagged terms in our dictionary.");
                });
                return;
            }

            for record in self.session.results() {
                let entry = &record.entry;
                let (_, accent) = severity_colors(&entry.severity);
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.colored_label(accent, entry.severity.label().to_uppercase());
                        ui.monospace(format!("\"{}\"", entry.term));
                        if record.count > 1 {
                            ui.weak(format!("x{}", record.count));
                        }
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.weak(&entry.category);
                        });
                    });
                    ui.label(&entry.explanation);
                    ui.horizontal(|ui| {
                        ui.colored_label(egui::Color32::from_rgb(74, 222, 128), "Try:");
                        ui.label(&entry.suggestion);
                    });
                });
                ui.add_space(6.0);
            }
        });
    }
}

/// Background and foreground colours per severity.
fn severity_colors(severity: &Severity) -> (egui::Color32, egui::Color32) {
    match severity {
        Severity::Critical => (egui::Color32::from_rgb(254, 226, 226), egui::Color32::from_rgb(153, 27, 27)),
        Severity::High => (egui::Color32::from_rgb(255, 237, 213), egui::Color32::from_rgb(154, 52, 18)),
        Severity::Medium => (egui::Color32::from_rgb(254, 249, 195), egui::Color32::from_rgb(133, 77, 14)),
        Severity::Low => (egui::Color32::from_rgb(219, 234, 254), egui::Color32::from_rgb(30, 64, 175)),
        Severity::Unrecognized(_) => (egui::Color32::from_rgb(226, 232, 240), egui::Color32::from_rgb(51, 65, 85)),
    }
}

/// One label per line of the segment; highlights carry their severity colours
/// and "category: explanation" on hover.
fn segment_labels(ui: &mut egui::Ui, segment: &Segment) {
    for (i, line) in segment.text().split('\n').enumerate() {
        if i > 0 {
            ui.end_row();
        }
        if line.is_empty() {
            continue;
        }
        let text = egui::RichText::new(line).monospace();
        match segment {
            Segment::Plain { .. } => {
                ui.label(text);
            }
            Segment::Highlight { severity, .. } => {
                let (background, foreground) = severity_colors(severity);
                let response = ui.label(text.color(foreground).background_color(background).underline());
                if let Some(hover) = segment.hover_text() {
                    response.on_hover_text(hover);
                }
            }
        }
    }
}

impl App for BiasDecoderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Export Report (JSON)").clicked() {
                        self.export_report();
                        ui.close_menu();
                    }
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.separator();
                ui.weak(&self.dictionary_status);
                if let Some(message) = &self.status_message {
                    ui.separator();
                    ui.label(message);
                }
            });
        });

        egui::SidePanel::right("report_panel")
            .min_width(300.0)
            .default_width(420.0)
            .show(ctx, |ui| self.report_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| match self.session.view() {
            ViewState::Input => self.input_view(ui),
            ViewState::Analyzed => self.decoded_view(ui),
        });
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load_config_or_default(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    init_tracing(&config);

    let source = DictionarySource::resolve(cli.dictionary.as_deref(), &config);
    let load = source.load().context("failed to load bias dictionary")?;
    info!(entries = load.entries.len(), rejected = load.rejected.len(), "dictionary ready");

    match &cli.command {
        Some(Command::Analyze { input, json, output }) => {
            let raw = read_input(input, std::io::stdin())
                .with_context(|| format!("failed to read {}", input.display()))?;
            let options = AnalyzeOptions {
                json: *json,
                output: output.clone(),
                max_input_chars: config.max_input_chars,
            };
            run_analyze(&raw, &load.entries, &options, &mut std::io::stdout().lock())?;
            Ok(())
        }
        None => {
            let dictionary_status = source.describe(&load);
            let options = NativeOptions {
                viewport: egui::ViewportBuilder::default()
                    .with_inner_size([1400.0, 860.0])
                    .with_min_inner_size([900.0, 600.0]),
                ..Default::default()
            };
            eframe::run_native(
                "Job Description Bias Decoder",
                options,
                Box::new(move |cc| Box::new(BiasDecoderApp::new(cc, &config, load, dictionary_status))),
            )
            .map_err(|e| anyhow::anyhow!("viewer exited with an error: {e}"))
        }
    }
}
