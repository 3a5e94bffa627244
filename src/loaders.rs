use crate::config::{Config, get_config};
use crate::model::{Student, StudentId};
use eyre::{Error, bail, eyre};
use tracing::debug;

pub use self::csv_loader::CsvLoader;
pub use self::sql_loader::DatabaseLoader;

mod csv_loader;
mod sql_loader;

/// Source of student records.
pub enum Loader {
    Database(DatabaseLoader),
    Csv(CsvLoader),
}

impl Loader {
    pub async fn from_config(config: &Config) -> Result<Loader, Error> {
        let kind = get_config(config, "source", "kind").unwrap_or_else(|| "database".to_owned());
        debug!(kind = %kind, "opening student source");
        Ok(match &kind[..] {
            "database" => {
                let url = get_config(config, "database", "url")
                    .ok_or_else(|| eyre!("cannot find database.url configuration parameter"))?;
                Loader::Database(DatabaseLoader::new(&url).await?)
            }
            "csv" => {
                let file = get_config(config, "csv", "file")
                    .ok_or_else(|| eyre!("cannot find csv.file configuration parameter"))?;
                Loader::Csv(CsvLoader::new(file))
            }
            other => bail!("unknown source: {}", other),
        })
    }

    pub async fn load_students(&mut self) -> Result<Vec<Student>, Error> {
        match self {
            Loader::Database(loader) => loader.load_students().await,
            Loader::Csv(loader) => loader.load_students(),
        }
    }

    /// Return `None` if there is no student with this id.
    pub async fn load_student(&mut self, id: StudentId) -> Result<Option<Student>, Error> {
        match self {
            Loader::Database(loader) => loader.load_student(id).await,
            Loader::Csv(loader) => loader.load_student(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_csv_source_from_config() {
        let path = std::env::temp_dir().join(format!("rcohort-source-{}.csv", std::process::id()));
        std::fs::write(
            &path,
            "id,name,category,residence,gpa,semester\n\
             7,Farah,SC,Hosteller,8.4,4\n",
        )
        .unwrap();
        let config = format!("[source]\nkind = \"csv\"\n[csv]\nfile = {:?}\n", path)
            .parse::<Config>()
            .unwrap();
        let mut loader = Loader::from_config(&config).await.unwrap();
        let found = loader.load_student(StudentId(7)).await.unwrap();
        let missing = loader.load_student(StudentId(8)).await.unwrap();
        let all = loader.load_students().await.unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(found.map(|s| s.name), Some("Farah".to_owned()));
        assert_eq!(missing, None);
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_source() {
        let config = "[source]\nkind = \"ldap\"\n".parse::<Config>().unwrap();
        assert!(Loader::from_config(&config).await.is_err());
    }

    #[tokio::test]
    async fn test_csv_source_needs_file() {
        let config = "[source]\nkind = \"csv\"\n".parse::<Config>().unwrap();
        assert!(Loader::from_config(&config).await.is_err());
    }
}
