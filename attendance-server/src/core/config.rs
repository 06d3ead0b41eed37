use chrono::NaiveTime;
use chrono_tz::Tz;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 8080 | HTTP 服务端口 |
/// | DATABASE_PATH | attendance.db | SQLite 数据库文件 |
/// | SESSION_TIMEZONE | Africa/Lagos | 业务时区 |
/// | SESSION_CUTOFF | 17:00 | 当日场次的截止时间 |
/// | ROSTER_PATH | roster.json | 报名表导出文件 (核对用) |
/// | LOG_DIR | (无) | 日志目录，未设置则仅输出到终端 |
///
/// # 示例
///
/// ```ignore
/// DATABASE_PATH=/data/attendance.db HTTP_PORT=3000 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// SQLite 数据库文件路径
    pub database_path: String,
    /// 业务时区 — 场次日期计算全部在该时区进行
    pub session_timezone: Tz,
    /// 当日场次截止时间 (本地时间，含前不含后)
    pub session_cutoff: NaiveTime,
    /// 报名表导出文件路径 (JSON)
    pub roster_path: String,
    /// 日志目录 (可选)
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置，未设置的项使用默认值
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "attendance.db".into()),
            session_timezone: std::env::var("SESSION_TIMEZONE")
                .ok()
                .and_then(|tz| parse_timezone(&tz))
                .unwrap_or(chrono_tz::Africa::Lagos),
            session_cutoff: std::env::var("SESSION_CUTOFF")
                .map(|c| parse_cutoff(&c))
                .unwrap_or_else(|_| NaiveTime::from_hms_opt(17, 0, 0).unwrap()),
            roster_path: std::env::var("ROSTER_PATH").unwrap_or_else(|_| "roster.json".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }
}

fn parse_timezone(tz: &str) -> Option<Tz> {
    match tz.parse::<Tz>() {
        Ok(tz) => Some(tz),
        Err(_) => {
            tracing::warn!(
                "Unknown SESSION_TIMEZONE '{}', falling back to Africa/Lagos",
                tz
            );
            None
        }
    }
}

/// 解析 cutoff 时间字符串 (HH:MM)，失败返回 17:00
fn parse_cutoff(cutoff: &str) -> NaiveTime {
    NaiveTime::parse_from_str(cutoff, "%H:%M").unwrap_or_else(|e| {
        tracing::warn!(
            "Failed to parse SESSION_CUTOFF '{}': {}, falling back to 17:00",
            cutoff,
            e
        );
        NaiveTime::from_hms_opt(17, 0, 0).unwrap()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cutoff() {
        assert_eq!(parse_cutoff("17:00"), NaiveTime::from_hms_opt(17, 0, 0).unwrap());
        assert_eq!(parse_cutoff("08:30"), NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        // Garbage falls back to the default cutoff
        assert_eq!(parse_cutoff("late"), NaiveTime::from_hms_opt(17, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("Europe/Lisbon"), Some(chrono_tz::Europe::Lisbon));
        assert_eq!(parse_timezone("Mars/Olympus"), None);
    }
}
