use clap::Parser;
use travel_planner::HashMap;
use travel_planner::hash_fn::BuiltinHash;
use travel_planner::hash_fn::HashFunction;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "count", default_value_t = 1000)]
    count: usize,

    #[arg(short = 'b', long = "buckets", default_value_t = 128)]
    buckets: usize,

    #[arg(short = 'l', long = "load_factor", default_value_t = 0.75)]
    load_factor: f64,

    /// Print one row per bucket after the histogram
    #[arg(long)]
    profile: bool,
}

fn main() {
    let args = Args::parse();

    for &builtin in BuiltinHash::all() {
        let mut map = HashMap::with_hash_function(
            args.buckets,
            args.load_factor,
            HashFunction::from(builtin),
        );

        println!("== {} (id {}) ==", builtin.description(), builtin.id());
        println!("Filling map with {} city-like keys...", args.count);
        for i in 0..args.count {
            map.insert(&format!("city_{i:05}"), i);
        }

        println!("Inserted {} keys into {} buckets", map.len(), map.bucket_count());
        println!("Final load factor: {:.2}%", map.load_factor() * 100.0);

        map.chain_histogram().print();
        map.debug_stats().print();
        if args.profile {
            map.print_profile();
        }
        println!();
    }
}
