//! `sando` CLI entry point

use clap::Parser;
use sando::{common::SandoError, MainCmd};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), SandoError> {
    set_thread_panic_hook();
    dotenvy::dotenv().ok();
    MainCmd::parse().run().await.inspect_err(|e| println!("{e:?}"))
}

/// Sets thread panic hook, useful for having tests that panic.
fn set_thread_panic_hook() {
    use std::{
        backtrace::Backtrace,
        panic::{set_hook, take_hook},
        process::exit,
    };
    let orig_hook = take_hook();
    set_hook(Box::new(move |panic_info| {
        println!("Custom backtrace: {}", Backtrace::capture());
        orig_hook(panic_info);
        exit(1);
    }));
}
