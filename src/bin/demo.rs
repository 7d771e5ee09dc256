//! console-ui demo
//!
//! A main menu that picks an action and a temperature converter, drawn on
//! the process's own terminal.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use console_ui::terminal::restore_terminal;
use console_ui::{
    Application, ButtonWidget, CrosstermInput, CrosstermTerminal, FocusDirection, FrameWidget,
    InputFieldWidget, LabelWidget, Menu, Navigation, Result, Screen, ScreenConfig, SelectorWidget,
    SpaceWidget, StackWidget, Vec2, WidgetRef,
};

#[derive(Parser)]
#[command(name = "console-ui-demo")]
#[command(about = "Menu and temperature converter built on console-ui")]
#[command(version)]
struct Cli {
    /// Milliseconds between background redraws
    #[arg(long, default_value_t = 50)]
    redraw_ms: u64,

    /// Write logs to this file (RUST_LOG filters, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        if let Err(e) = init_logging(path) {
            eprintln!("Error: cannot open log file {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to a file: the terminal is busy being drawn on.
fn init_logging(path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .init();
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));
}

fn run(cli: &Cli) -> Result<()> {
    install_panic_hook();
    let config = ScreenConfig::default().redraw_interval(Duration::from_millis(cli.redraw_ms));
    let screen = Screen::new(CrosstermTerminal::enter()?, CrosstermInput::new(), config);
    Application::new(screen).run(Box::new(MainMenu::default()))
}

// ============================================================================
// MAIN MENU
// ============================================================================

struct Action {
    title: &'static str,
    description: &'static str,
    button_label: &'static str,
    open: fn() -> Navigation,
}

static ACTIONS: [Action; 2] = [
    Action {
        title: "Convert temperature",
        description: "Convert between several\ntemperature units.",
        button_label: "Start",
        open: open_temperature,
    },
    Action {
        title: "Exit",
        description: "Leave the program.\nGoodbye and thanks.",
        button_label: "Quit",
        open: exit,
    },
];

fn open_temperature() -> Navigation {
    Navigation::Push(Box::new(TemperatureMenu::default()))
}

fn exit() -> Navigation {
    Navigation::Pop
}

struct MainWidgets {
    selector: Arc<SelectorWidget>,
    button: Arc<ButtonWidget>,
    description: Arc<LabelWidget>,
}

impl MainWidgets {
    fn selected(&self) -> &'static Action {
        &ACTIONS[self.selector.selection().min(ACTIONS.len() - 1)]
    }

    fn update(&self) {
        let action = self.selected();
        self.button.set_label(action.button_label);
        self.description.set_text(action.description);
    }
}

#[derive(Default)]
struct MainMenu {
    widgets: Option<MainWidgets>,
}

impl Menu for MainMenu {
    fn name(&self) -> &str {
        "main"
    }

    fn initialize(&mut self, screen: &Screen) -> Result<()> {
        let widgets = MainWidgets {
            selector: Arc::new(SelectorWidget::new(ACTIONS.iter().map(|a| a.title))),
            button: Arc::new(ButtonWidget::new("")),
            description: Arc::new(LabelWidget::new("", 0.0)),
        };
        widgets.update();

        let details = StackWidget::new(
            vec![
                widgets.description.clone(),
                Arc::new(SpaceWidget::default()),
                widgets.button.clone(),
            ],
            Vec2::DOWN,
        )
        .with_alignment(0.0);
        let row = StackWidget::new(
            vec![
                widgets.selector.clone(),
                Arc::new(SpaceWidget::new(3)),
                Arc::new(details),
            ],
            Vec2::RIGHT,
        );
        let root: WidgetRef = Arc::new(FrameWidget::new(Arc::new(row)));

        screen.update(|content| {
            content.set_elements(vec![root]);
            content.set_focus_order(
                FocusDirection::Horizontal,
                vec![widgets.selector.clone(), widgets.button.clone()],
            );
        });
        self.widgets = Some(widgets);
        Ok(())
    }

    fn run(&mut self, screen: &Screen) -> Result<Navigation> {
        let Some(widgets) = &self.widgets else {
            return Ok(Navigation::Pop);
        };
        loop {
            if !screen.handle_input()? {
                continue;
            }
            if widgets.button.take_pressed() {
                return Ok((widgets.selected().open)());
            }
            widgets.update();
            screen.refresh()?;
        }
    }
}

// ============================================================================
// TEMPERATURE CONVERTER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Unit {
    Celsius,
    Kelvin,
    Fahrenheit,
    Reaumur,
}

impl Unit {
    const ALL: [Unit; 4] = [Unit::Celsius, Unit::Kelvin, Unit::Fahrenheit, Unit::Reaumur];

    fn name(self) -> &'static str {
        match self {
            Unit::Celsius => "Celsius",
            Unit::Kelvin => "Kelvin",
            Unit::Fahrenheit => "Fahrenheit",
            Unit::Reaumur => "Réaumur",
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Unit::Celsius => "°C",
            Unit::Kelvin => "K",
            Unit::Fahrenheit => "°F",
            Unit::Reaumur => "°Ré",
        }
    }

    fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            Unit::Celsius => celsius,
            Unit::Kelvin => celsius + 273.15,
            Unit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            Unit::Reaumur => celsius * 0.8,
        }
    }
}

/// At most two decimals, trailing zeros dropped.
fn format_temperature(value: f64) -> String {
    let text = format!("{:.2}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" { "0".to_string() } else { text.to_string() }
}

fn convert(input: &str, unit: Option<Unit>) -> String {
    match (input.parse::<f64>(), unit) {
        (Ok(celsius), Some(unit)) => {
            format!("{} {}", format_temperature(unit.from_celsius(celsius)), unit.symbol())
        }
        _ => "N/A".to_string(),
    }
}

struct TemperatureWidgets {
    back: Arc<ButtonWidget>,
    input: Arc<InputFieldWidget>,
    unit: Arc<SelectorWidget>,
    output: Arc<LabelWidget>,
}

impl TemperatureWidgets {
    fn update(&self) {
        let unit = Unit::ALL.get(self.unit.selection()).copied();
        self.output.set_text(convert(&self.input.contents(), unit));
    }
}

#[derive(Default)]
struct TemperatureMenu {
    widgets: Option<TemperatureWidgets>,
}

impl Menu for TemperatureMenu {
    fn name(&self) -> &str {
        "temperature"
    }

    fn initialize(&mut self, screen: &Screen) -> Result<()> {
        let widgets = TemperatureWidgets {
            back: Arc::new(ButtonWidget::new("←")),
            input: Arc::new(
                InputFieldWidget::new(|c| c.is_ascii_digit() || c == '-' || c == '.')
                    .with_width(4)
                    .with_contents("17"),
            ),
            unit: Arc::new(
                SelectorWidget::new(Unit::ALL.iter().map(|u| u.name())).with_selection(2),
            ),
            output: Arc::new(LabelWidget::new("", 0.0).with_min_width(10)),
        };
        widgets.update();

        let row = StackWidget::new(
            vec![
                widgets.input.clone(),
                Arc::new(SpaceWidget::default()),
                Arc::new(LabelWidget::new("°C", 0.0)),
                Arc::new(SpaceWidget::new(2)),
                Arc::new(LabelWidget::new("→", 0.0)),
                Arc::new(SpaceWidget::new(2)),
                widgets.unit.clone(),
                Arc::new(SpaceWidget::new(3)),
                widgets.output.clone(),
            ],
            Vec2::RIGHT,
        )
        .with_alignment(0.6);
        let body: WidgetRef = Arc::new(FrameWidget::new(Arc::new(row)).with_border(None));

        screen.update(|content| {
            content.set_elements(vec![widgets.back.clone(), body]);
            content.set_focus_order(
                FocusDirection::Horizontal,
                vec![widgets.back.clone(), widgets.input.clone(), widgets.unit.clone()],
            );
            content.focus_element(&*widgets.input);
        });
        self.widgets = Some(widgets);
        Ok(())
    }

    fn run(&mut self, screen: &Screen) -> Result<Navigation> {
        let Some(widgets) = &self.widgets else {
            return Ok(Navigation::Pop);
        };
        loop {
            if !screen.handle_input()? {
                continue;
            }
            if widgets.back.take_pressed() {
                return Ok(Navigation::Pop);
            }
            widgets.update();
            screen.refresh()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_temperature() {
        assert_eq!(format_temperature(62.6), "62.6");
        assert_eq!(format_temperature(290.15), "290.15");
        assert_eq!(format_temperature(20.0), "20");
        assert_eq!(format_temperature(-0.001), "0");
    }

    #[test]
    fn test_convert() {
        assert_eq!(convert("17", Some(Unit::Fahrenheit)), "62.6 °F");
        assert_eq!(convert("-40", Some(Unit::Fahrenheit)), "-40 °F");
        assert_eq!(convert("10", Some(Unit::Reaumur)), "8 °Ré");
        assert_eq!(convert("-", Some(Unit::Celsius)), "N/A");
        assert_eq!(convert("", Some(Unit::Kelvin)), "N/A");
        assert_eq!(convert("5", None), "N/A");
    }
}
