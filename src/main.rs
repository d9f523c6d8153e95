use std::fs;
use std::path::PathBuf;
use std::process;
use clap::Parser;
use log::{error, info, LevelFilter};
use fountain_lines::{Conf, FountainError, FountainParser, FountainResult, ParseOutput};

/// 按行分类 Fountain 剧本并打印结果
#[derive(Parser, Debug)]
#[command(name = "fountain-lines", version, about)]
struct Args {
    /// 要解析的 .fountain 文件
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// 批量模式：整篇解析后再做第二遍修正
    #[arg(short, long)]
    batch: bool,

    /// 以 JSON 输出完整结果
    #[arg(short, long)]
    json: bool,

    /// JSON 配置文件
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose { LevelFilter::Debug } else { LevelFilter::Warn })
        .init();

    if let Err(e) = run(&args) {
        error!("{}", e);
        eprintln!("解析失败: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> FountainResult<()> {
    let config = match &args.config {
        Some(path) => Conf::load(path)?,
        None => Conf::default(),
    };

    let content = fs::read_to_string(&args.file).map_err(|e| FountainError::Io {
        path: args.file.display().to_string(),
        source: e,
    })?;

    let mut parser = FountainParser::new(config);
    let result = if args.batch {
        parser.parse_document(&content)
    } else {
        parser.parse(&content)
    };
    info!("解析完成: {}行, 用时{}ms", result.lines.len(), result.parse_time);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_lines(&result);
    }
    Ok(())
}

fn print_lines(result: &ParseOutput) {
    for (index, line) in result.lines.iter().enumerate() {
        println!("{:>5}  {:<32} {}", index + 1, line.type_as_string(), line.raw_text);
    }
    if result.unclosed_omission {
        println!("警告: 文档结束时省略块没有关闭");
    }
}
