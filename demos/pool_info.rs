use std::env;
use std::process;

use cpool::CharacterPool;
use cpool::Result;
use cpool::inspect::PoolSummary;

fn main() -> Result<()> {
    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: pool_info <character-pool.bin>");
        process::exit(2);
    };

    let pool = CharacterPool::open(&path)?;

    println!("pool file:  {}", pool.pool_file_name);
    println!("mode:       {:?}", pool.selection_mode);
    println!("characters: {}", pool.native_characters.len());
    for soldier in &pool.native_characters {
        println!(
            "  {} {} ({})",
            soldier.first_name, soldier.last_name, soldier.soldier_class_template
        );
    }
    println!("extra data: {}", pool.extra_data.len());

    if let Some(bio) = PoolSummary::from_pool(&pool).biography {
        println!("\n{bio}");
    }

    Ok(())
}
