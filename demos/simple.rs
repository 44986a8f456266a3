use enum_bitset::{impl_domain, EnumMap, EnumSet};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl_domain!(Weekday => [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
]);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let weekend = EnumSet::of([Weekday::Sat, Weekday::Sun]);
    println!("weekend = {}", weekend);
    let workdays = !&weekend;
    println!("workdays = {}", workdays);
    println!("storage = {:?}", workdays.kind());

    let mut gym = EnumSet::of([Weekday::Mon, Weekday::Thu, Weekday::Sat]);
    println!("gym = {}", gym);
    println!("gym overlaps weekend: {}", gym.overlaps(&weekend)?);
    gym.except_with(&weekend)?;
    println!("gym on workdays = {}", gym);
    println!(
        "gym is subset of workdays: {}",
        gym.is_subset_of(&workdays)?
    );

    let mut hours = EnumMap::new();
    for day in &workdays {
        hours.set(day, 8);
    }
    hours[Weekday::Fri] = 6;
    println!("hours = {}", hours);
    println!("total = {}", hours.values().sum::<u32>());

    Ok(())
}
