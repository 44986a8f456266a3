use std::fmt::Debug;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::bail;

use enum_bitset::descriptor::DomainDescriptor;
use enum_bitset::set::{EnumSet, SetConfig, StoragePolicy};
use enum_bitset::{impl_domain, Domain};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl_domain!(Suit => [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]);

/// A square of a 10x10 board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
struct Cell(u8);

impl Domain for Cell {
    fn constants() -> Vec<Self> {
        (0..100).map(Cell).collect()
    }
}

#[derive(Debug, Copy, Clone, ValueEnum)]
enum DomainArg {
    /// 4 values, scalar storage.
    Suit,
    /// 100 values, array storage.
    Cell,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
enum Op {
    Union,
    Intersect,
    Except,
    Xor,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
enum StorageArg {
    Auto,
    Scalar,
    Array,
}

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Domain to operate on.
    #[arg(long, value_enum, default_value = "cell")]
    domain: DomainArg,

    /// Operation to apply.
    #[arg(long, value_enum, default_value = "union")]
    op: Op,

    /// Storage policy for the left operand.
    #[arg(long, value_enum, default_value = "auto")]
    storage: StorageArg,

    /// Ordinals of the left operand.
    #[arg(long, value_name = "INT", value_delimiter = ',')]
    left: Vec<usize>,

    /// Ordinals of the right operand.
    #[arg(long, value_name = "INT", value_delimiter = ',')]
    right: Vec<usize>,
}

fn values<D: Domain>(ordinals: &[usize]) -> color_eyre::Result<Vec<D>> {
    let descriptor = DomainDescriptor::<D>::get();
    let mut res = Vec::with_capacity(ordinals.len());
    for &i in ordinals {
        if i >= descriptor.len() {
            bail!(
                "ordinal {} is out of range, domain has {} values",
                i,
                descriptor.len()
            );
        }
        res.push(descriptor.value(i));
    }
    Ok(res)
}

fn run<D: Domain>(args: &Cli) -> color_eyre::Result<()> {
    let config = SetConfig {
        storage: match args.storage {
            StorageArg::Auto => StoragePolicy::Auto,
            StorageArg::Scalar => StoragePolicy::Scalar,
            StorageArg::Array => StoragePolicy::Array,
        },
    };

    let mut left = EnumSet::<D>::with_config(&config)?;
    left.extend(values::<D>(&args.left)?);
    let right = values::<D>(&args.right)?;
    println!(
        "left = {} ({:?}, {} members)",
        left,
        left.kind(),
        left.len()
    );
    println!("right = {:?}", right);

    println!("left subset of right: {}", left.is_subset_of(&right)?);
    println!("left superset of right: {}", left.is_superset_of(&right)?);
    println!("left overlaps right: {}", left.overlaps(&right)?);

    let time = std::time::Instant::now();
    match args.op {
        Op::Union => left.union_with(right)?,
        Op::Intersect => left.intersect_with(right)?,
        Op::Except => left.except_with(right)?,
        Op::Xor => left.symmetric_except_with(right)?,
    }
    println!("{:?} = {} in {:?}", args.op, left, time.elapsed());

    let mut out = vec![DomainDescriptor::<D>::get().value(0); left.len()];
    left.copy_to(Some(out.as_mut_slice()), 0)?;
    println!("members = {:?}", out);

    Ok(())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Cli::parse();
    println!("args = {:?}", args);

    match args.domain {
        DomainArg::Suit => run::<Suit>(&args),
        DomainArg::Cell => run::<Cell>(&args),
    }
}
