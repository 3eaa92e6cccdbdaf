use potion_trader::{HashVariant, LinearProbeTable, RandomGen, TableConfig};
use serde::{Deserialize, Serialize};
use tracing::info;

const ADJECTIVES: [&str; 12] = [
    "Minor", "Greater", "Extreme", "Deadly", "Instant", "Lasting", "Swift", "Bitter", "Glowing",
    "Ancient", "Murky", "Volatile",
];
const EFFECTS: [&str; 10] = [
    "Health", "Speed", "Strength", "Poison", "Invisibility", "Regeneration", "Fire Resistance",
    "Night Vision", "Leaping", "Slowness",
];

const MAX_DRAWS: usize = 10_000;

#[derive(Serialize, Deserialize, Debug)]
pub struct VariantStatistics {
    pub hash_variant: HashVariant,
    pub table_size: usize,
    pub entries: usize,
    pub conflict_count: usize,
    pub probe_total: usize,
    pub probe_max: usize,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Report {
    pub seed: i64,
    pub results: Vec<VariantStatistics>,
}

///Distinct potion names drawn with `rand`, may return fewer than `count`
fn potion_names(rand: &mut RandomGen, count: usize) -> Vec<String> {
    let combinations = ADJECTIVES.len() * EFFECTS.len();
    let mut taken = vec![false; combinations];
    let mut names = Vec::with_capacity(count);
    for _ in 0..MAX_DRAWS {
        if names.len() >= count {
            break;
        }
        let Ok(index) = rand.randint(combinations) else {
            break;
        };
        let index = index - 1;
        if taken[index] {
            continue;
        }
        taken[index] = true;
        names.push(format!(
            "Potion of {} {}",
            ADJECTIVES[index / EFFECTS.len()],
            EFFECTS[index % EFFECTS.len()]
        ));
    }
    names
}

pub fn run(seed: i64, count: usize) -> Report {
    let mut rand = RandomGen::new(seed);
    let names = potion_names(&mut rand, count);
    println!("Hash statistics for {} potion names (seed {seed})", names.len());
    println!("{:<8}{:>12}{:>12}{:>12}{:>12}", "hash", "table size", "conflicts", "probe total", "probe max");

    let mut results = vec![];
    for hash_variant in [HashVariant::Good, HashVariant::Bad, HashVariant::Xxh3] {
        let config = TableConfig::new(names.len()).set_hash_variant(hash_variant);
        let mut table = match LinearProbeTable::new(&config) {
            Ok(table) => table,
            Err(why) => panic!("Unable to create table for {:?}, reason {}", hash_variant, why),
        };
        for name in &names {
            if let Err(why) = table.insert(name, ()) {
                panic!("Unable to insert {name}, reason {why}");
            }
        }
        let (conflict_count, probe_total, probe_max) = table.statistics();
        info!(?hash_variant, conflict_count, probe_total, probe_max, "filled table");
        println!(
            "{:<8}{:>12}{:>12}{:>12}{:>12}",
            format!("{:?}", hash_variant),
            table.table_size(),
            conflict_count,
            probe_total,
            probe_max
        );
        results.push(VariantStatistics {
            hash_variant,
            table_size: table.table_size(),
            entries: table.len(),
            conflict_count,
            probe_total,
            probe_max,
        });
    }
    Report { seed, results }
}
