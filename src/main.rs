use anyhow::{Context, Result};
use clap::Parser;
use kenshin_common::variant::{CountScope, Eligibility};
use kenshin_common::{FormatVariant, VariantKind};
use kenshin_convert::{cli, config, convert, logging};
use cli::{Cli, Commands};
use config::Config;
use std::path::PathBuf;

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("設定ファイルを読み込めません: {}", path.display())),
        None => Config::load().context("設定ファイルを読み込めません"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Convert { input, format, output, no_roster_template } => {
            let log_config = logging::LogConfig::new(config.log_file.clone(), cli.verbose);
            let _guard = logging::init_logging(&log_config).context("ログを初期化できません")?;

            let variant = FormatVariant::get(format);
            println!("🏥 kenshin-convert - {}\n", variant.label);
            logging::log_start(&input, format.key());

            let output_dir = output
                .or_else(|| config.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from("."));

            let options = convert::ConvertOptions {
                input: input.clone(),
                format,
                output_dir,
                run_date: chrono::Local::now().date_naive(),
                roster_template_passthrough: config.roster_template_passthrough
                    && !no_roster_template,
                show_progress: !cli.verbose,
            };

            println!("[1/2] 入力ファイルを変換中...");
            let summary = convert::run(&options, &config)
                .with_context(|| format!("変換に失敗しました: {}", input.display()))?;
            println!("✔ {}件のレコードを読み込み\n", summary.records);

            println!("[2/2] 会社別の出力結果");
            if summary.companies.is_empty() {
                println!("  対象となる会社がありませんでした");
            }
            for company in &summary.companies {
                println!(
                    "✔ {} ({}): {}件 / 出力{}行 / 名簿{}行",
                    company.company.name,
                    company.company.code,
                    company.counted,
                    company.rows,
                    company.roster_rows,
                );
                println!("    {}", company.paths.data.display());
                println!("    {}", company.paths.roster.display());
                if company.issues > 0 {
                    println!("    ⚠ 要確認 {}件", company.issues);
                }
            }

            logging::log_finish(summary.companies.len(), summary.total_issues());

            if summary.total_issues() > 0 {
                println!(
                    "\n⚠ 要確認の項目が{}件あります（{}）",
                    summary.total_issues(),
                    config.log_file.display()
                );
            }
            println!("\n✅ 完了");
        }

        Commands::Formats => {
            println!("提出先フォーマット:");
            for kind in VariantKind::ALL {
                let variant = FormatVariant::get(kind);
                let eligibility = match variant.eligibility {
                    Eligibility::All => "全件",
                    Eligibility::CourseAllowList => "対象コースのみ",
                };
                let counting = match variant.count_scope {
                    CountScope::Eligible => "出力対象のみ",
                    CountScope::AllMatches => "会社一致すべて",
                };
                println!(
                    "  {:<9} {} ({}列, {}, 出力: {}, 件数: {})",
                    kind.key(),
                    variant.label,
                    variant.width,
                    variant.sink.extension(),
                    eligibility,
                    counting
                );
                if variant.count_may_exceed_rows() {
                    println!("            ※ 件数が出力行数より多くなることがあります");
                }
            }
        }

        Commands::Companies => {
            println!("会社一覧:");
            for company in config.companies() {
                println!("  {} {}", company.code, company.name);
            }
        }

        Commands::Config { show, init } => {
            if init {
                let path = Config::config_path()?;
                if path.exists() {
                    println!("設定ファイルは既にあります: {}", path.display());
                } else {
                    Config::default().save()?;
                    println!("✔ 設定ファイルを作成しました: {}", path.display());
                }
            }

            if show || !init {
                println!("設定:");
                println!("  健診機関: {} ({})", config.facility.name, config.facility.number);
                println!("  入力文字コード: {}", config.input_encoding);
                println!(
                    "  出力先: {}",
                    config
                        .output_dir
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| ".".into())
                );
                println!("  ログ: {}", config.log_file.display());
                println!("  会社数: {}", config.companies().len());
                println!(
                    "  名簿テンプレート行: {}",
                    if config.roster_template_passthrough { "含める" } else { "含めない" }
                );
            }
        }
    }

    Ok(())
}
