use clap::Parser;
use smartfarm::{cli, client, config, error, io, render, scanner, workspace};
use cli::{Cli, Commands, EncyclopediaTarget};
use client::{ApiClient, FarmApi};
use config::Config;
use error::{Result, SmartFarmError};
use smartfarm_common::api::CONFIRM_DELETE;
use smartfarm_common::detail::GroupDetail;
use smartfarm_common::encyclopedia::{
    crop_name_kor, DiseaseRecord, EncyclopediaEntry, EnemyRecord, EntryKind, InsectRecord,
};
use smartfarm_common::grid::EditMode;
use smartfarm_common::layout::{layout_segments, resolve_axis};
use smartfarm_common::statistics::{GraphKind, YearSelection};
use smartfarm_common::types::{remove_greenhouse, sensor_status, GreenhouseSummary};
use smartfarm_common::workflow::WorkflowState;
use tracing_subscriber::EnvFilter;
use workspace::WorkspaceSession;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_entry<T: EncyclopediaEntry>(entry: &T) {
    println!("{}\n", entry.title());
    println!("[{}]", entry.section_title());
    for (label, value) in entry.fields() {
        println!("{}:\n{}\n", label, value);
    }
    let images = entry.images();
    if !images.is_empty() {
        println!("[{}]", entry.images_title());
        for image in images {
            println!("  {} ({})", image.alt, image.src);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stored = Config::load_from(&Config::config_path()?)?;

    if let Commands::Config { set_base_url, set_session, set_farm, show } = cli.command {
        // 명령행 --base-url과 환경 변수는 저장하지 않는다
        let mut stored = stored;
        if let Some(url) = set_base_url {
            stored.set_base_url(&url)?;
            stored.save()?;
            println!("✔ API 서버 주소를 설정했습니다: {}", stored.base_url);
        }
        if let Some(cookie) = set_session {
            stored.session_cookie = Some(cookie);
            stored.save()?;
            println!("✔ 세션 쿠키를 설정했습니다");
        }
        if let Some(farm_id) = set_farm {
            stored.default_farm_id = Some(farm_id);
            stored.save()?;
            println!("✔ 기본 농장을 설정했습니다: {}", farm_id);
        }
        if show {
            let effective = stored.with_overrides(cli.base_url.as_deref())?;
            println!("{}", effective.describe());
        }
        return Ok(());
    }

    let config = stored.with_overrides(cli.base_url.as_deref())?;
    tracing::debug!(base_url = %config.base_url, "설정 로드");

    let api = ApiClient::new(&config)?;

    match cli.command {
        Commands::Farm { farm } => {
            let farm_id = config.farm_id(farm)?;
            let info = api.farm(farm_id).await?;
            println!("🌱 {}\n", render::farm_header(&info));
            if let Some(location) = &info.location {
                match api.weather(location).await {
                    Ok(report) => println!("{}", render::weather(&report)),
                    Err(e) => println!("⚠ 날씨 정보를 불러오는데 실패했습니다. ({})", e),
                }
            }
        }

        Commands::Greenhouses { farm } => {
            let farm_id = config.farm_id(farm)?;
            let list = api.greenhouses(farm_id).await?;
            println!("{}", render::greenhouse_list(&list, list.first().map(|gh| gh.id)));
        }

        Commands::Grid { greenhouse } => {
            let response = api.grid(greenhouse).await?;
            match response.grid() {
                Some(grid) => {
                    println!("{}행 × {}열\n", response.num_rows, response.num_cols);
                    println!("{}", render::grid(&grid));
                }
                None => println!("그리드 데이터가 없습니다."),
            }
        }

        Commands::Groups { greenhouse, detail } => {
            let response = api.groups(greenhouse).await?;
            let axis = resolve_axis(response.axis, &response.groups);
            println!("{}", render::group_bars(&layout_segments(Some(response.groups.as_slice()), axis, detail)));
            if let Some(id) = detail {
                let group = response
                    .groups
                    .iter()
                    .find(|g| g.id == id)
                    .ok_or(SmartFarmError::GroupNotFound(id))?;
                println!("\n{}", render::group_detail(&GroupDetail::new(group, axis)));
            }
        }

        Commands::Sensor { greenhouse } => {
            let reading = api.sensor(greenhouse).await.ok();
            println!("{}", render::sensor(&sensor_status(reading.as_ref())));
        }

        Commands::Weather { city, farm } => {
            let city = match city {
                Some(city) => city,
                None => {
                    let info = api.farm(config.farm_id(farm)?).await?;
                    info.location
                        .ok_or_else(|| SmartFarmError::Unavailable("농장 위치가 없습니다".into()))?
                }
            };
            println!("{}", render::weather(&api.weather(&city).await?));
        }

        Commands::Workspace { farm, greenhouse } => {
            let farm_id = config.farm_id(farm)?;
            let list = api.greenhouses(farm_id).await?;
            let selected = workspace::pick_greenhouse(&list, farm_id, greenhouse)?;
            workspace::run_interactive(&api, selected).await?;
        }

        Commands::Capture { greenhouse, group, iot, no_wait } => {
            println!("📷 촬영 명령\n");
            let summary = GreenhouseSummary {
                id: greenhouse,
                ..Default::default()
            };
            let mut session = WorkspaceSession::open(&api, summary).await?;
            if no_wait {
                session = session.without_reload_delay();
            }
            if let Some(completion) = session.start_capture().await? {
                workspace::print_completion(&completion);
                return Ok(());
            }
            let device_id = match iot {
                Some(id) => id,
                None => match session.workflow.state() {
                    WorkflowState::ChoosingIotDevice { devices, .. } => {
                        let items: Vec<String> = devices.iter().map(render::device_choice).collect();
                        devices[workspace::select("IoT 기기 선택", &items)?].id
                    }
                    _ => return Ok(()),
                },
            };
            session.choose_device(device_id)?;
            session.select_group(group)?;
            let completion = session.submit_capture().await?;
            workspace::print_completion(&completion);
        }

        Commands::Upload { greenhouse, group, images, no_wait } => {
            println!("📤 이미지 업로드\n");
            let files = scanner::collect_upload_files(&images)?;
            println!("✔ {}개 이미지", files.len());

            let summary = GreenhouseSummary {
                id: greenhouse,
                ..Default::default()
            };
            let mut session = WorkspaceSession::open(&api, summary).await?;
            if no_wait {
                session = session.without_reload_delay();
            }
            session.begin_upload()?;
            session.select_group(group)?;
            session.attach_files(files);
            let completion = session.submit_upload().await?;
            workspace::print_completion(&completion);
            if let Some(analysis) = session.workflow.upload_summary() {
                println!("\n{}", render::upload_summary(analysis));
            }
        }

        Commands::Edit { greenhouse, grid_file, name, farm, yes } => {
            let new_grid = io::load_grid_file(&grid_file)
                .map_err(|e| SmartFarmError::InvalidGrid(format!("{:#}", e)))?;
            let current = api.grid(greenhouse).await?;
            let (rows, cols) = (current.num_rows, current.num_cols);
            if new_grid.len() != rows || new_grid.iter().any(|r| r.len() != cols) {
                return Err(SmartFarmError::InvalidGrid(format!(
                    "하우스 크기는 {}행 × {}열입니다",
                    rows, cols
                )));
            }

            let name = match name {
                Some(name) => name,
                None => {
                    let farm_id = config.farm_id(farm)?;
                    api.greenhouses(farm_id)
                        .await?
                        .into_iter()
                        .find(|gh| gh.id == greenhouse)
                        .map(|gh| gh.name)
                        .ok_or(SmartFarmError::NoGreenhouse(farm_id))?
                }
            };

            let mut edit = EditMode::default();
            edit.begin(&current.grid().unwrap_or_else(|| vec![vec![0; cols]; rows]));
            for (r, row) in new_grid.iter().enumerate() {
                for (c, &value) in row.iter().enumerate() {
                    edit.set_cell(r, c, value)?;
                }
            }
            if let Some((axis, groups)) = edit.preview() {
                println!("{}\n", render::group_preview(axis, &groups));
            }
            if !yes && !workspace::confirm("이 그리드로 저장할까요?")? {
                println!("취소했습니다");
                return Ok(());
            }
            if let Some(request) = edit.save_request(&name, rows, cols) {
                if let Err(e) = api.update_greenhouse(greenhouse, &request).await {
                    edit.save_failed();
                    println!("⚠ 그리드 저장에 실패했습니다.");
                    return Err(e);
                }
                edit.finish_save();
                println!("✔ 그리드를 저장했습니다");
            }
        }

        Commands::Delete { greenhouse, yes } => {
            if !yes && !workspace::confirm(CONFIRM_DELETE)? {
                println!("취소했습니다");
                return Ok(());
            }
            api.delete_greenhouse(greenhouse).await?;
            println!("✔ 하우스 {}를 삭제했습니다", greenhouse);
            if let Some(farm_id) = config.default_farm_id {
                let mut list = api.greenhouses(farm_id).await.unwrap_or_default();
                let next = remove_greenhouse(&mut list, greenhouse);
                println!("{}", render::greenhouse_list(&list, next.map(|gh| gh.id)));
            }
        }

        Commands::Encyclopedia { target } => match target.entry() {
            None => {
                let EncyclopediaTarget::Crop { crop } = &target else {
                    return Ok(());
                };
                let detail = api.crop_detail(crop).await.map_err(|e| {
                    tracing::warn!("{}", e);
                    SmartFarmError::Unavailable(format!("{}에 대한 정보를 불러올 수 없습니다.", crop))
                })?;
                println!("{}", render::crop_detail(crop_name_kor(crop), &detail));
            }
            Some((kind, id)) => {
                let result = match kind {
                    EntryKind::Disease => api.entry::<DiseaseRecord>(kind, id).await.map(|r| print_entry(&r)),
                    EntryKind::Insect => api.entry::<InsectRecord>(kind, id).await.map(|r| print_entry(&r)),
                    EntryKind::Enemy => api.entry::<EnemyRecord>(kind, id).await.map(|r| print_entry(&r)),
                };
                if let Err(e) = result {
                    tracing::warn!("{}", e);
                    println!("{}", kind.load_error());
                }
            }
        },

        Commands::Statistics { graph, year, output } => {
            let graph = GraphKind::from(graph);
            let mut years = YearSelection::default();
            if let (Some(param), Some(year)) = (graph.year_param(), year) {
                if !years.set(param, year) {
                    println!("⚠ 선택할 수 없는 연도: {}", year);
                }
            }
            let response = api.statistics(graph, &years).await?;
            let figure = response.plot()?;
            println!("📈 {}", response.graph_title);
            match output {
                Some(path) => {
                    io::save_json(&path, &figure)
                        .map_err(|e| SmartFarmError::Save(format!("{:#}", e)))?;
                    println!("✔ 저장: {}", path.display());
                }
                None => println!("{}", serde_json::to_string_pretty(&figure)?),
            }
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}
