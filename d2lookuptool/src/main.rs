use anyhow::anyhow;
use clap::{Parser, Subcommand};
use d2lookup::{builtin, record::ObjectLookupRecord, table::ObjectLookupTable};
use std::{borrow::Cow, fs, io, path::Path};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Tab separated lookup table to use instead of the built-in one
    #[arg(short, long, value_name = "OBJECTS_TXT")]
    data: Option<Box<Path>>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the row for an (act, type, id) triple; a missing row aborts
    Find {
        act: i32,
        /// 1 = character, 2 = item
        typ: i32,
        id: i32,
    },

    /// List rows, optionally restricted to one act and/or type
    List {
        #[arg(short, long)]
        act: Option<i32>,
        #[arg(short, long = "type")]
        typ: Option<i32>,
    },

    /// Print animation resource candidates for every component layer of a row
    Layers {
        act: i32,
        typ: i32,
        id: i32,
        /// Animation mode (e.g. "NU", "WL")
        #[arg(short, long)]
        mode: Option<Box<str>>,
        /// Weapon class (e.g. "HTH", "1HS")
        #[arg(short, long)]
        class: Option<Box<str>>,
    },

    /// Export the table → objects.csv
    Export {
        /// Directory path to write exported files into
        #[arg(short, long)]
        out_dir: Box<Path>,
    },
}

fn load_table(data: Option<&Path>) -> anyhow::Result<Cow<'static, ObjectLookupTable>> {
    match data {
        Some(path) => {
            let table = ObjectLookupTable::open(path)
                .map_err(|e| anyhow!("{}: {e}", path.to_string_lossy()))?;
            Ok(Cow::Owned(table))
        }
        None => Ok(Cow::Borrowed(builtin::table())),
    }
}

fn tsv_writer() -> csv::Writer<io::Stdout> {
    csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(io::stdout())
}

fn print_rows<'a>(rows: impl Iterator<Item = &'a ObjectLookupRecord>) -> anyhow::Result<()> {
    let mut w = tsv_writer();
    for row in rows {
        w.serialize(row)?;
    }
    w.flush()?;
    Ok(())
}

fn find(table: &ObjectLookupTable, act: i32, typ: i32, id: i32) -> anyhow::Result<()> {
    print_rows(std::iter::once(table.find(act, typ, id)))
}

fn list(table: &ObjectLookupTable, act: Option<i32>, typ: Option<i32>) -> anyhow::Result<()> {
    print_rows(table.iter().filter(|r| {
        act.map_or(true, |act| r.act == act) && typ.map_or(true, |typ| r.typ == typ)
    }))
}

fn layers(
    table: &ObjectLookupTable,
    (act, typ, id): (i32, i32, i32),
    mode: Option<&str>,
    class: Option<&str>,
) -> anyhow::Result<()> {
    let row = table.find(act, typ, id);
    let mode = mode.unwrap_or(&row.mode);
    let class = class.unwrap_or(&row.class);

    for (layer, _) in row.layers() {
        if let Some(paths) = row.layer_animation_paths(layer, mode, class) {
            for path in paths {
                println!("{layer}\t{path}");
            }
        }
    }
    Ok(())
}

fn export(table: &ObjectLookupTable, out_dir: &Path) -> anyhow::Result<()> {
    let out_path = out_dir.join("objects.csv");

    fs::create_dir_all(out_dir)?;
    let mut out_file = fs::File::create(&out_path)?;

    let mut w = csv::Writer::from_writer(&mut out_file);
    for row in table {
        w.serialize(row)?;
    }
    w.flush()?;

    tracing::info!(rows = table.len(), "exported object lookup table");
    println!("{}", out_path.to_string_lossy());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let table = load_table(cli.data.as_deref())?;

    match cli.command {
        Commands::Find { act, typ, id } => find(&table, act, typ, id),
        Commands::List { act, typ } => list(&table, act, typ),
        Commands::Layers {
            act,
            typ,
            id,
            mode,
            class,
        } => layers(&table, (act, typ, id), mode.as_deref(), class.as_deref()),
        Commands::Export { out_dir } => export(&table, &out_dir),
    }
}
