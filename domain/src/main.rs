use std::env;
use std::process;

use domain::adapters::memory_storage::InMemoryStorage;
use domain::repository::DefaultSellerRepository;
use domain::{NewSeller, RepositoryError, Seller, SellerRepository, Sellers};

fn print_usage() {
    eprintln!(
        "{}\n\nUsage:\n  domain save <first_name> <last_name> <email>\n  domain get <id>\n\nNotes:\n  - This demo CLI uses an in-memory storage seeded with one seller (id 1); data is not persisted across runs.",
        domain::about()
    );
}

fn demo_seed() -> Sellers {
    let john = Seller {
        id: 1,
        first_name: "John".into(),
        last_name: "Doe".into(),
        email: "johndoe@gmail.com".into(),
    };
    [(john.id, john)].into_iter().collect()
}

fn print_seller(s: &Seller) {
    println!("{}\t{}\t{}\t{}", s.id, s.first_name, s.last_name, s.email);
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1); // skip program name

    let Some(cmd) = args.next() else {
        print_usage();
        return Ok(());
    };

    let repo = DefaultSellerRepository::new(InMemoryStorage::with_sellers(demo_seed()));

    match cmd.as_str() {
        "save" => {
            let (Some(first_name), Some(last_name), Some(email)) =
                (args.next(), args.next(), args.next())
            else {
                return Err("save requires <first_name> <last_name> <email>".into());
            };
            let created = repo
                .save(NewSeller {
                    first_name,
                    last_name,
                    email,
                })
                .map_err(|e| format!("save failed: {}", e))?;
            print_seller(&created);
            Ok(())
        }
        "get" => {
            let Some(id_str) = args.next() else {
                return Err("missing <id> for get".into());
            };
            let id = id_str
                .parse()
                .map_err(|_| format!("invalid id: {}", id_str))?;
            match repo.get_by_id(id) {
                Ok(s) => {
                    print_seller(&s);
                    Ok(())
                }
                Err(RepositoryError::NotFound) => Err("not found".into()),
                Err(e) => Err(format!("get failed: {}", e)),
            }
        }
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn main() {
    if let Err(msg) = run() {
        eprintln!("error: {}", msg);
        process::exit(1);
    }
}
