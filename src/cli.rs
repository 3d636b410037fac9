use anyhow::{anyhow, Result};
use std::env;

use crate::api::{ApiClient, TaskBackend};
use crate::models::{Priority, TaskDraft};
use crate::view::{self, TaskListView};
use crate::{config, session};

/// 处理 CLI 命令
/// 返回 true 表示应该继续进入 TUI，false 表示已处理完毕应该退出
pub fn handle_cli() -> Result<bool> {
    let args: Vec<String> = env::args().collect();

    // 没有参数就进 TUI
    if args.len() < 2 {
        return Ok(true);
    }

    match args[1].as_str() {
        "list" => {
            if let Err(e) = cli_list() {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
            Ok(false)
        }
        "add" => {
            if args.len() < 3 {
                eprintln!("用法: tdk add <task-title>");
                std::process::exit(1);
            }
            if let Err(e) = cli_add(&args[2..]) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
            Ok(false)
        }
        "logout" => {
            session::clear_session()?;
            println!("✓ 已登出");
            Ok(false)
        }
        "config" => {
            if args.len() < 3 {
                config::show_config()?;
            } else {
                match args[2].as_str() {
                    "show" => config::show_config()?,
                    "server" => {
                        if args.len() < 4 {
                            eprintln!("用法: tdk config server <url>");
                            std::process::exit(1);
                        }
                        config::set_server(args[3].clone())?;
                    }
                    _ => {
                        eprintln!("未知的配置选项: {}", args[2]);
                        eprintln!("可用选项: show, server");
                        std::process::exit(1);
                    }
                }
            }
            Ok(false)
        }
        "--help" | "-h" => {
            print_help();
            Ok(false)
        }
        "--version" | "-V" | "-v" => {
            print_version();
            Ok(false)
        }
        _ => {
            eprintln!("未知命令: {}", args[1]);
            eprintln!("使用 'tdk --help' 查看帮助");
            std::process::exit(1);
        }
    }
}

/// 已登录会话，CLI 命令的前提
fn require_session() -> Result<session::Session> {
    session::load_session()?.ok_or_else(|| anyhow!("未登录，请先运行 tdk 在界面里登录"))
}

/// 打印当前用户的任务列表
fn cli_list() -> Result<()> {
    let session = require_session()?;
    let config = config::load_config()?;
    let api = ApiClient::new(config.api_base);

    let tasks = api.tasks_for_user(session.user.id)?;

    match view::render(&tasks) {
        TaskListView::Empty => println!("(无任务)"),
        TaskListView::Tasks(records) => {
            for record in records {
                let mark = if record.completed { "✓" } else { " " };
                println!(
                    "[{}] #{:<4} {:<8} {:<14} {}",
                    mark, record.id, record.priority_display, record.deadline_display, record.title
                );
            }
        }
    }

    Ok(())
}

/// 快速创建任务（默认优先级，无截止日期）
fn cli_add(words: &[String]) -> Result<()> {
    let title = words.join(" ").trim().to_string();
    if title.is_empty() {
        return Err(anyhow!("标题不能为空"));
    }

    let session = require_session()?;
    let config = config::load_config()?;
    let api = ApiClient::new(config.api_base);

    let created = api.create_task(&TaskDraft {
        user_id: session.user.id,
        title,
        body: String::new(),
        priority: Priority::default(),
        deadline: None,
    })?;

    println!("✓ 已创建任务 #{}: {}", created.id, created.title);
    Ok(())
}

fn print_help() {
    println!("Taskdeck - 任务板终端客户端");
    println!();
    println!("用法:");
    println!("  tdk                       启动 TUI");
    println!("  tdk list                  列出当前用户的任务");
    println!("  tdk add <task-title>      快速创建任务");
    println!("  tdk logout                清除本地会话");
    println!("  tdk config show           查看当前配置");
    println!("  tdk config server <url>   设置服务地址");
    println!("  tdk --help                显示帮助");
    println!("  tdk --version             显示版本");
}

fn print_version() {
    println!("tdk {}", env!("CARGO_PKG_VERSION"));
}
