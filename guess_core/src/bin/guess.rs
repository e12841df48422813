//! guess CLI — text front end for the car guesser.
//!
//! `catalog` lists the known cars, `play` runs a guessing session and `learn`
//! teaches the guesser a new car. Every change is saved to the snapshot.

use anyhow::Context;
use car_rules::{parse_answer, BaseAttribute, Entity, Prefix, PREFIX_BITS};
use clap::{Parser, Subcommand};
use guess_core::{
    GuessConfig, Informant, KnowledgeBase, NewEntity, Outcome, Prompt, Resolution, RuleUse,
    Session, SnapshotFile,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "guess", version = env!("CARGO_PKG_VERSION"), about = "Guess a car from five yes/no answers, and teach it new ones")]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = "guess.toml")]
    config: PathBuf,

    /// Snapshot file (overrides the configuration)
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every known car
    Catalog,
    /// Answer the questions and let the guesser name your car
    Play,
    /// Add a new car to the knowledge base
    Learn,
}

/// Line-based console for questions and replies.
struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    fn read_line(&mut self) -> guess_core::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(guess_core::Error::aborted("input closed"));
        }
        Ok(line.trim().to_string())
    }

    fn ask_yes_no(&mut self, prompt: &str) -> guess_core::Result<bool> {
        loop {
            write!(self.output, "{prompt} (sí/no): ")?;
            self.output.flush()?;
            if let Some(yes) = parse_answer(&self.read_line()?) {
                return Ok(yes);
            }
            writeln!(self.output, "  → Responde 'sí' o 'no' (o 's'/'n').")?;
        }
    }

    fn ask_text(&mut self, prompt: &str, allow_empty: bool) -> guess_core::Result<String> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;
            let text = self.read_line()?;
            if allow_empty || !text.is_empty() {
                return Ok(text);
            }
            writeln!(self.output, "  → No puede estar vacío.")?;
        }
    }
}

impl<R: BufRead, W: Write> Informant for Console<R, W> {
    fn new_question(
        &mut self,
        prefix: Prefix,
        _newcomer: &str,
        colliding: &[&Entity],
    ) -> guess_core::Result<String> {
        writeln!(
            self.output,
            "⚠️ Encontré {} coche(s) con el mismo binario 5 bits: {prefix}",
            colliding.len()
        )?;
        for car in colliding {
            writeln!(self.output, "   - {}", car.name)?;
        }
        writeln!(self.output, "\nNo existe aún una pregunta especial para este binario.")?;
        self.ask_text(
            "Escribe la PREGUNTA ESPECIAL (sí/no) para diferenciar este grupo: ",
            false,
        )
    }

    fn answer(&mut self, question: &str, subject: &str) -> guess_core::Result<bool> {
        writeln!(self.output, "\nPara: {subject}")?;
        self.ask_yes_no(question)
    }
}

fn print_catalog(kb: &KnowledgeBase, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n=== Catálogo de coches disponibles ===")?;
    for (i, car) in kb.catalog().enumerate() {
        match &car.image {
            Some(img) => writeln!(out, "{:2}. {}  [imagen: {}]", i + 1, car.name, img)?,
            None => writeln!(out, "{:2}. {}", i + 1, car.name)?,
        }
    }
    writeln!(out, "======================================\n")
}

fn print_resolution(resolution: &Resolution<'_>, out: &mut impl Write) -> io::Result<()> {
    let prefix = resolution.prefix;
    match &resolution.outcome {
        Outcome::Unique(car) => {
            writeln!(out, "\nTu coche es: {}", car.name)?;
            if let Some(img) = &car.image {
                writeln!(out, "Imagen: {img}")?;
            }
            let note = if resolution.tie_break.is_some() {
                " + (desempate aplicado)"
            } else {
                ""
            };
            writeln!(out, "Binario detectado: {prefix}{note}")
        }
        Outcome::Ambiguous(cars) => {
            writeln!(out, "\nHay más de un candidato posible:")?;
            for car in cars {
                writeln!(out, "• {}", car.name)?;
            }
            writeln!(
                out,
                "Sugerencia: agrega más preguntas especiales para el patrón {prefix}."
            )
        }
        Outcome::NoMatch(suggestions) => {
            writeln!(out, "\nNo encontré coincidencias exactas para {prefix}.")?;
            writeln!(out, "Sugerencias cercanas:")?;
            for s in suggestions {
                writeln!(
                    out,
                    "• {} (dist={}, binario={})",
                    s.entity.name,
                    s.distance,
                    s.entity.prefix()
                )?;
            }
            Ok(())
        }
    }
}

fn play<R: BufRead, W: Write>(
    session: &Session<SnapshotFile>,
    console: &mut Console<R, W>,
) -> anyhow::Result<()> {
    let mut resolver = session.resolver();
    while let Some(prompt) = resolver.prompt() {
        if let Prompt::Special { .. } = prompt {
            writeln!(console.output, "\nPregunta especial (desempate)")?;
        }
        let yes = console.ask_yes_no(prompt.text())?;
        resolver.answer(yes)?;
    }
    if let Some(resolution) = resolver.resolution() {
        print_resolution(resolution, &mut console.output)?;
    }
    Ok(())
}

fn learn<R: BufRead, W: Write>(
    session: &mut Session<SnapshotFile>,
    console: &mut Console<R, W>,
) -> anyhow::Result<()> {
    writeln!(console.output, "\n🔧 MODO APRENDIZAJE — Agregar coche nuevo")?;
    let name = console.ask_text("Nombre del coche: ", false)?;
    let image = console.ask_text("URL o ruta de imagen (opcional, deja vacío): ", true)?;

    writeln!(console.output, "\nAhora responde las 5 preguntas base para tu coche:")?;
    let mut answers = [false; PREFIX_BITS];
    for (answer, attribute) in answers.iter_mut().zip(BaseAttribute::ALL) {
        *answer = console.ask_yes_no(attribute.question())?;
    }

    let new = NewEntity {
        name,
        prefix: Prefix::from_answers(answers),
        image: Some(image),
    };
    let learned = session.learn(new, &mut *console)?;

    let how = match learned.rule {
        RuleUse::NotNeeded => "sin duplicados",
        RuleUse::Reused => "con 6º bit por regla existente",
        RuleUse::Created => "con nueva regla y 6º bit",
    };
    writeln!(console.output, "✅ Añadido {how}: {}  ({})", learned.name, learned.code)?;
    for name in &learned.extended {
        writeln!(console.output, "   → Actualizado: {name}")?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "guess_core=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = GuessConfig::load(&cli.config)
        .with_context(|| format!("reading config {}", cli.config.display()))?;
    let snapshot = cli.snapshot.unwrap_or(config.knowledge.snapshot);
    tracing::info!("Snapshot: {}", snapshot.display());

    let mut session =
        Session::open(SnapshotFile::new(&snapshot)).with_suggestions(config.matching.suggestions);

    let stdin = io::stdin();
    let mut console = Console {
        input: stdin.lock(),
        output: io::stdout(),
    };

    match cli.command {
        Command::Catalog => print_catalog(session.knowledge(), &mut console.output)?,
        Command::Play => play(&session, &mut console)?,
        Command::Learn => {
            learn(&mut session, &mut console)?;
            writeln!(console.output, "\n💾 Cambios guardados en {}", snapshot.display())?;
        }
    }
    Ok(())
}
