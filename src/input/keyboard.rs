use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, AuthField, Screen};
use crate::ui::dialogs::{DialogType, FormField};

/// 处理键盘输入
/// 返回 false 表示应该退出应用
pub fn handle_key_input(app: &mut App, key: KeyEvent) -> bool {
    // 欢迎对话框：任意按键关闭
    if app.show_welcome_dialog {
        app.show_welcome_dialog = false;
        return true;
    }

    // 帮助面板：任意按键关闭
    if app.show_help {
        app.show_help = false;
        return true;
    }

    // 对话框优先于页面
    if app.dialog.is_some() {
        return handle_dialog_mode(app, key);
    }

    match app.screen {
        Screen::Login => handle_login_screen(app, key),
        Screen::Register => handle_register_screen(app, key),
        Screen::Tasks => handle_tasks_screen(app, key),
        Screen::Profile => handle_profile_screen(app, key),
    }
}

/// 登录页按键
fn handle_login_screen(app: &mut App, key: KeyEvent) -> bool {
    // Ctrl+R 切到注册页
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('r') {
        app.screen = Screen::Register;
        app.auth_focus = AuthField::Username;
        return true;
    }

    match key.code {
        KeyCode::Esc => return false,
        KeyCode::Enter => app.submit_login(),
        KeyCode::Tab | KeyCode::Down | KeyCode::Up => {
            app.auth_focus = match app.auth_focus {
                AuthField::Password => AuthField::Email,
                _ => AuthField::Password,
            };
        }
        KeyCode::Backspace => {
            auth_field_mut(app).pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            auth_field_mut(app).push(c);
        }
        _ => {}
    }
    true
}

/// 注册页按键
fn handle_register_screen(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.screen = Screen::Login;
            app.auth_focus = AuthField::Email;
        }
        KeyCode::Enter => app.submit_register(),
        KeyCode::Tab | KeyCode::Down => {
            app.auth_focus = match app.auth_focus {
                AuthField::Username => AuthField::Email,
                AuthField::Email => AuthField::Password,
                AuthField::Password => AuthField::Username,
            };
        }
        KeyCode::Up => {
            app.auth_focus = match app.auth_focus {
                AuthField::Username => AuthField::Password,
                AuthField::Email => AuthField::Username,
                AuthField::Password => AuthField::Email,
            };
        }
        KeyCode::Backspace => {
            auth_field_mut(app).pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            auth_field_mut(app).push(c);
        }
        _ => {}
    }
    true
}

fn auth_field_mut(app: &mut App) -> &mut String {
    match app.auth_focus {
        AuthField::Username => &mut app.auth_username,
        AuthField::Email => &mut app.auth_email,
        AuthField::Password => &mut app.auth_password,
    }
}

/// 任务列表页按键
fn handle_tasks_screen(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => return false,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Char('a') => app.open_new_task_form(),
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(id) = app.selected_task_id() {
                app.open_edit_form(id);
            }
        }
        KeyCode::Char('c') => app.complete_selected(),
        KeyCode::Char('d') => {
            if let Some(id) = app.selected_task_id() {
                app.request_delete(id);
            }
        }
        KeyCode::Char('r') => app.refresh_tasks(),
        KeyCode::Char('p') => app.screen = Screen::Profile,
        KeyCode::Char('L') => app.logout(),
        _ => {}
    }
    true
}

/// 个人资料页按键
fn handle_profile_screen(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.screen = Screen::Tasks,
        KeyCode::Char('e') => app.open_profile_form(),
        KeyCode::Char('L') => app.logout(),
        KeyCode::Char('?') => app.show_help = true,
        _ => {}
    }
    true
}

/// 对话框按键
fn handle_dialog_mode(app: &mut App, key: KeyEvent) -> bool {
    let Some(mut dialog) = app.dialog.take() else {
        return true;
    };

    match &mut dialog {
        DialogType::TaskForm(form) => {
            // Ctrl+S 在任何字段都提交
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
                if !app.submit_task_form(form) {
                    app.dialog = Some(dialog);
                }
                return true;
            }

            match key.code {
                KeyCode::Esc => {
                    // 丢弃表单
                    return true;
                }
                KeyCode::Tab => {
                    form.focus = form.focus.next();
                }
                KeyCode::BackTab => {
                    form.focus = form.focus.prev();
                }
                KeyCode::Enter if form.focus != FormField::Body => {
                    // 单行字段里 Enter 等同提交
                    if !app.submit_task_form(form) {
                        app.dialog = Some(dialog);
                    }
                    return true;
                }
                _ => match form.focus {
                    FormField::Title => edit_line(&mut form.title, key),
                    FormField::Deadline => edit_line(&mut form.deadline, key),
                    FormField::Priority => match key.code {
                        KeyCode::Left => form.priority = form.priority.prev(),
                        KeyCode::Right | KeyCode::Char(' ') => {
                            form.priority = form.priority.next()
                        }
                        _ => {}
                    },
                    FormField::Body => {
                        if !key.modifiers.contains(KeyModifiers::CONTROL) {
                            form.body.handle_key(key);
                        }
                    }
                },
            }
            app.dialog = Some(dialog);
        }

        DialogType::ConfirmDelete {
            task_id,
            yes_selected,
        } => match key.code {
            KeyCode::Char('y') => {
                let id = *task_id;
                app.confirm_delete(id);
            }
            KeyCode::Char('n') | KeyCode::Esc => {}
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                *yes_selected = !*yes_selected;
                app.dialog = Some(dialog);
            }
            KeyCode::Enter => {
                if *yes_selected {
                    let id = *task_id;
                    app.confirm_delete(id);
                }
            }
            _ => {
                app.dialog = Some(dialog);
            }
        },

        DialogType::Profile(form) => match key.code {
            KeyCode::Esc => {
                return true;
            }
            KeyCode::Enter => {
                if !app.submit_profile(form) {
                    app.dialog = Some(dialog);
                }
                return true;
            }
            KeyCode::Tab | KeyCode::Down => {
                form.focus = form.focus.next();
                app.dialog = Some(dialog);
            }
            _ => {
                let field = match form.focus {
                    crate::ui::dialogs::ProfileField::Username => &mut form.username,
                    crate::ui::dialogs::ProfileField::Email => &mut form.email,
                    crate::ui::dialogs::ProfileField::Password => &mut form.password,
                };
                edit_line(field, key);
                app.dialog = Some(dialog);
            }
        },
    }

    true
}

/// 单行输入的通用编辑
fn edit_line(value: &mut String, key: KeyEvent) {
    match key.code {
        KeyCode::Backspace => {
            value.pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            value.push(c);
        }
        _ => {}
    }
}
