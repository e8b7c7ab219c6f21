//! 程序入口：初始化日志与配置、加载 Slint UI，并绑定 VM 回调

use std::{cell::RefCell, path::PathBuf, rc::Rc, sync::Arc};

use anyhow::Context;
use futures::channel::oneshot;
use slint::{ComponentHandle, ModelRc, SharedString, VecModel};
use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

use file_converter::{
    vm::bridge::*, ConverterConfig, ConverterState, DirectoryDownloads, HttpBackend,
    SubmissionStatus, Submitter, ViewSnapshot,
};

slint::include_modules!();

type AppSubmitter = Submitter<HttpBackend, DirectoryDownloads>;
/// 状态只在UI线程上访问
type SharedState = Rc<RefCell<ConverterState>>;

/// VM桥接器：管理UI与转换器状态的交互
struct ViewModelBridge {
    state: SharedState,
    submitter: Arc<AppSubmitter>,
}

impl ViewModelBridge {
    /// 创建新的VM桥接器并绑定所有回调
    fn new(app_window: &AppWindow, state: SharedState, submitter: Arc<AppSubmitter>) -> Self {
        let bridge = Self { state, submitter };
        bridge.setup_callbacks(app_window);
        bridge
    }

    fn setup_callbacks(&self, app_window: &AppWindow) {
        // === 转换类型选择 ===
        {
            let state = self.state.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_conversion_changed(move |index| {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::handle_conversion_changed(&app_window, &state, index);
                }
            });
        }

        // === 点击拖放区浏览文件 ===
        {
            let state = self.state.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_browse_file(move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::handle_browse_file(&app_window, &state);
                }
            });
        }

        // === 提交转换 ===
        {
            let state = self.state.clone();
            let submitter = self.submitter.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_convert(move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::handle_convert(&app_window, &state, &submitter);
                }
            });
        }
    }

    /// 初始化UI状态
    fn initialize_ui(&self, app_window: &AppWindow) {
        app_window.set_title_text(APP_TITLE.into());
        app_window.set_subtitle_text(APP_SUBTITLE.into());
        app_window.set_convert_label(CONVERT_LABEL.into());

        let snapshot = self.state.borrow().snapshot();
        let labels: Vec<SharedString> = snapshot
            .menu_labels
            .iter()
            .map(|l| l.as_str().into())
            .collect();
        app_window.set_conversion_labels(ModelRc::new(VecModel::from(labels)));
        Self::render(app_window, &snapshot);
    }

    /// 把快照推送到UI
    fn render(app_window: &AppWindow, snapshot: &ViewSnapshot) {
        app_window.set_selected_index(snapshot.selected_index as i32);
        app_window.set_description_text(snapshot.description.as_str().into());
        app_window.set_drop_label(snapshot.drop_label.as_str().into());
        app_window.set_has_file(snapshot.has_file);
        app_window.set_can_submit(snapshot.can_submit);
        app_window.set_status_message(snapshot.status_message.as_str().into());
    }

    fn refresh(app_window: &AppWindow, state: &SharedState) {
        let snapshot = state.borrow().snapshot();
        Self::render(app_window, &snapshot);
    }

    fn handle_conversion_changed(app_window: &AppWindow, state: &SharedState, index: i32) {
        if let Ok(index) = usize::try_from(index) {
            let mut guard = state.borrow_mut();
            if guard.select_index(index) {
                tracing::info!("转换类型: {}", guard.selected());
            }
        }
        Self::refresh(app_window, state);
    }

    /// 显示文件选择对话框（允许多选，只保留第一个）
    fn show_file_dialog() -> Vec<PathBuf> {
        use rfd::FileDialog;

        match FileDialog::new()
            .add_filter("所有文件", &["*"])
            .set_title("选择要转换的文件")
            .pick_files()
        {
            Some(paths) => paths,
            None => {
                tracing::info!("用户取消了文件选择");
                Vec::new()
            }
        }
    }

    fn handle_browse_file(app_window: &AppWindow, state: &SharedState) {
        let paths = Self::show_file_dialog();
        state.borrow_mut().drop_zone_mut().on_file_dropped(paths);
        Self::refresh(app_window, state);
    }

    /// 本地校验在UI线程完成；读文件与网络请求放到后台线程，
    /// 终态经 oneshot 送回UI线程再写入状态
    fn handle_convert(app_window: &AppWindow, state: &SharedState, submitter: &Arc<AppSubmitter>) {
        let pending = state.borrow_mut().start_submission(submitter.as_ref());
        Self::refresh(app_window, state);
        let Some(pending) = pending else {
            return;
        };

        let (tx, rx) = oneshot::channel();
        let worker_submitter = submitter.clone();
        std::thread::spawn(move || {
            let status = pending.run(worker_submitter.as_ref());
            let _ = tx.send(status);
        });

        let state = state.clone();
        let app_window_weak = app_window.as_weak();
        let spawned = slint::spawn_local(async move {
            // 后台线程异常退出时发送端被丢弃
            let status = rx.await.unwrap_or_else(|_| {
                tracing::error!("后台提交线程未返回结果");
                SubmissionStatus::Failed
            });
            state.borrow_mut().finish_submission(&status);
            if let Some(app_window) = app_window_weak.upgrade() {
                Self::refresh(&app_window, &state);
            }
        });
        if let Err(e) = spawned {
            tracing::error!("无法调度提交结果处理: {}", e);
        }
    }
}

fn main() -> anyhow::Result<()> {
    // 初始化日志输出，RUST_LOG 可覆盖
    let _ = SubscriberBuilder::default()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();

    let config = ConverterConfig::load().context("加载配置失败")?;
    let endpoint = config.endpoint_url()?;
    tracing::info!("转换服务地址: {}", endpoint);

    let backend = HttpBackend::new(endpoint).context("创建 HTTP 客户端失败")?;
    let downloads = DirectoryDownloads::new(config.resolve_download_dir());
    tracing::info!("下载目录: {}", downloads.dir().display());
    let submitter = Arc::new(Submitter::new(backend, downloads, config.extension_policy));

    let state = Rc::new(RefCell::new(ConverterState::new(config.default_conversion)));
    // 拖放到程序图标上的文件以命令行参数传入
    state
        .borrow_mut()
        .drop_zone_mut()
        .on_file_dropped(std::env::args_os().skip(1).map(PathBuf::from));

    let app = AppWindow::new().context("UI 初始化失败")?;
    let bridge = ViewModelBridge::new(&app, state, submitter);
    bridge.initialize_ui(&app);

    tracing::info!("应用启动成功，UI已初始化");
    app.run().context("UI 事件循环异常退出")?;
    Ok(())
}
