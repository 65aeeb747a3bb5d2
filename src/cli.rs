// Copyright (c) 2026 Hearthbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("hearthbook")
        .about("Household ledger: shared income, expenses, and savings funds")
        .version(clap::crate_version!())
        .subcommand(
            Command::new("init").about("Create the family and seed defaults").arg(
                Arg::new("family")
                    .long("family")
                    .default_value("Our Family")
                    .help("Family name"),
            ),
        )
        .subcommand(
            Command::new("person")
                .about("Manage household members")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("color")
                                .long("color")
                                .default_value("#4F46E5")
                                .help("Avatar color"),
                        ),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("activate").arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(
                    Command::new("deactivate").arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("method")
                .about("Manage payment methods")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("icon").long("icon").default_value("💳"))
                        .arg(
                            Arg::new("opening")
                                .long("opening")
                                .default_value("0")
                                .help("Opening balance"),
                        ),
                )
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("Kind family: personal_income, household_expense, business_income, business_expense, fund"),
                        )
                        .arg(Arg::new("color").long("color").default_value(""))
                        .arg(Arg::new("icon").long("icon").default_value("")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("rm").arg(Arg::new("name").long("name").required(true))),
        )
        .subcommand(
            Command::new("fund")
                .about("Manage savings funds")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("icon").long("icon").default_value("🏦"))
                        .arg(
                            Arg::new("goal")
                                .long("goal")
                                .default_value("0")
                                .help("Monthly goal"),
                        )
                        .arg(
                            Arg::new("opening")
                                .long("opening")
                                .default_value("0")
                                .help("Opening balance"),
                        ),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("set-goal")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("goal").long("goal").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and browse movements")
                .subcommand(
                    Command::new("add")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("Movement kind, e.g. household_expense or fund_deposit"),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD; defaults to today"),
                        )
                        .arg(Arg::new("person").long("person").required(true))
                        .arg(Arg::new("method").long("method").required(true))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("fund").long("fund"))
                        .arg(Arg::new("note").long("note"))
                        .arg(
                            Arg::new("queue")
                                .long("queue")
                                .action(ArgAction::SetTrue)
                                .help("Stage in the offline outbox instead of writing"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .help("YYYY-MM; defaults to the current month"),
                        )
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .help("Kind, or 'business'/'fund' for both of the pair, or 'all'"),
                        )
                        .arg(Arg::new("person").long("person"))
                        .arg(Arg::new("method").long("method"))
                        .arg(Arg::new("date").long("date").help("Exact day YYYY-MM-DD"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(clap::value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(clap::value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Monthly dashboards")
                .subcommand(json_flags(Command::new("summary").arg(
                    Arg::new("month").long("month").help("YYYY-MM; defaults to the current month"),
                )))
                .subcommand(json_flags(
                    Command::new("balances").arg(
                        Arg::new("recomputed")
                            .long("recomputed")
                            .action(ArgAction::SetTrue)
                            .help("Replay history instead of reading stored balances"),
                    ),
                ))
                .subcommand(json_flags(
                    Command::new("categories")
                        .arg(Arg::new("month").long("month"))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("household_expense"),
                        ),
                ))
                .subcommand(json_flags(Command::new("funds"))),
        )
        .subcommand(
            Command::new("outbox")
                .about("Offline submission queue")
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("replay"))
                .subcommand(
                    Command::new("drop").arg(Arg::new("id").long("id").required(true).help(
                        "Client id of the queued entry",
                    )),
                ),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("transactions")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv or json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(Command::new("doctor").about("Check ledger integrity"))
}
