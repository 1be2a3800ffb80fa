//! Project generation command

use anyhow::{Context, Result};
use console::style;
use goserve_gen::{
    DependencyResolver, GenerationReport, GeneratorConfig, GoModTidy, ProjectAssembler,
    ProjectOptions, SkipResolution, WorkspaceMode,
};
use indicatif::{ProgressBar, ProgressStyle};

/// Command line switches that override the loaded configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct NewFlags {
    /// Skip `go mod tidy`
    pub skip_tidy: bool,
    /// Write straight into the target
    pub in_place: bool,
    /// Print the report as JSON instead of the console summary
    pub json: bool,
}

/// Generate a new goserve project
pub struct NewCommand {
    options: ProjectOptions,
    resolver: Box<dyn DependencyResolver>,
    resolves_dependencies: bool,
    json: bool,
}

impl NewCommand {
    /// Create a new command instance
    ///
    /// Features default to the configured list when none are given.
    ///
    /// # Errors
    ///
    /// Returns an error if the target or module path is empty, or a feature
    /// name is invalid. Nothing has been written at that point.
    pub fn new(
        target: String,
        module: String,
        features: Vec<String>,
        config: &GeneratorConfig,
        flags: NewFlags,
    ) -> Result<Self> {
        let features = if features.is_empty() {
            config.features.clone()
        } else {
            features
        };

        let mode = if flags.in_place {
            WorkspaceMode::InPlace
        } else {
            config.workspace_mode()
        };

        let options = ProjectOptions::new(target, module)?
            .with_features(features)?
            .with_go_version(config.go_version.clone())
            .with_mode(mode);

        let resolves_dependencies = !flags.skip_tidy && config.resolve_dependencies;
        let resolver: Box<dyn DependencyResolver> =
            if resolves_dependencies {
                Box::new(GoModTidy::new(config.go_binary.clone()))
            } else {
                Box::new(SkipResolution)
            };

        Ok(Self {
            options,
            resolver,
            resolves_dependencies,
            json: flags.json,
        })
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        let target = self.options.target.display().to_string();

        if !self.json {
            println!(
                "{} {} {}",
                style("Creating").green().bold(),
                style("goserve project:").bold(),
                style(&target).cyan().bold()
            );
            println!();
        }

        let spinner = if self.json {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .context("Failed to set progress style")?,
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));

        let assembler = ProjectAssembler::new(self.options.clone())?;
        let result = assembler.run_with(self.resolver.as_ref(), |step| {
            spinner.set_message(step.description());
        });
        spinner.finish_and_clear();

        let report = result.with_context(|| format!("Failed to generate project in {target}"))?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?
            );
        } else {
            self.print_success(&report);
        }

        Ok(())
    }

    /// Print success message with next steps
    fn print_success(&self, report: &GenerationReport) {
        println!("{}", style("✓ Project created successfully!").green().bold());
        println!();
        println!(
            "  {} files, features: {}",
            style(report.files.len()).cyan(),
            report
                .features
                .iter()
                .map(|feature| feature.route.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!();
        println!("{}", style("Next steps:").bold());
        println!();
        println!("  {} Navigate to project:", style("1.").cyan());
        println!(
            "     {} {}",
            style("$").dim(),
            style(format!("cd {}", report.target.display())).cyan()
        );
        println!();
        println!("  {} Start MongoDB, Redis and the API:", style("2.").cyan());
        println!("     {} {}", style("$").dim(), style("docker compose up --build").cyan());
        println!();
        println!("  {} Run the tests:", style("3.").cyan());
        println!("     {} {}", style("$").dim(), style("go test ./...").cyan());
        println!();
        if !self.resolves_dependencies {
            println!(
                "  {} Dependencies were not resolved with `go mod tidy`; run it before building.",
                style("!").yellow().bold()
            );
            println!();
        }
        println!("{}", style("Happy building with goserve!").green().bold());
    }
}
