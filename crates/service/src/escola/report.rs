//! Text reports returned as HTTP bodies.
//!
//! Clients parse these strings, so line labels and blank-line placement are
//! part of the contract.

use std::collections::HashMap;
use std::fmt::Write;

use chrono::NaiveDate;

use super::domain::{Aluno, Turma};

pub const ALUNOS_ATIVOS_HEADER: &str = "Relação de alunos cuja turma está ativa:\n\n";
pub const TURMAS_ATIVAS_HEADER: &str = "Relação de turmas ativas:\n\n";
pub const SEM_TURMAS_ATIVAS: &str = "Não há turmas ativas.";
pub const SEM_ALUNOS_MATRICULADOS: &str = "\tNão há nenhum aluno matriculado nesta turma.";

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn format_faltas(total_faltas: Option<i32>) -> String {
    total_faltas.map(|n| n.to_string()).unwrap_or_default()
}

/// Student summary: one labelled line per field, class id last.
pub fn aluno_block(aluno: &Aluno) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Id do aluno: {}", aluno.id);
    let _ = writeln!(out, "Nome: {}", aluno.nome);
    let _ = writeln!(out, "Data de Nascimento: {}", format_date(aluno.data_nascimento));
    let _ = writeln!(out, "Sexo: {}", aluno.sexo);
    let _ = writeln!(out, "Total de faltas: {}", format_faltas(aluno.total_faltas));
    let _ = writeln!(out, "Id da turma: {}", aluno.turma_id);
    out
}

/// Student summary followed by the class name and status.
pub fn aluno_detail(aluno: &Aluno, turma: &Turma) -> String {
    format!("{}Turma: {} (Status: {})", aluno_block(aluno), turma.nome, turma.status_label())
}

/// Students whose class is active, in input order.
///
/// Students whose class is missing from `turmas` are skipped.
pub fn alunos_ativos(alunos: &[Aluno], turmas: &HashMap<i32, Turma>) -> String {
    let mut body = String::new();
    for aluno in alunos {
        let Some(turma) = turmas.get(&aluno.turma_id).filter(|t| t.is_active()) else {
            continue;
        };
        body.push_str(&aluno_block(aluno));
        let _ = writeln!(body, "Turma: {}\n", turma.nome);
    }
    if body.is_empty() {
        body.push_str(SEM_TURMAS_ATIVAS);
    }
    format!("{}{}", ALUNOS_ATIVOS_HEADER, body)
}

/// Class header plus a tab-indented block per enrolled student.
pub fn turma_block(turma: &Turma, alunos: &[Aluno]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Turma: {}", turma.nome);
    let _ = writeln!(out, "Id: {}", turma.id);
    let _ = writeln!(out, "Status: {}", turma.status_label());
    let _ = writeln!(out, "Alunos matriculados:");

    if alunos.is_empty() {
        let _ = writeln!(out, "{}", SEM_ALUNOS_MATRICULADOS);
        return out;
    }
    for aluno in alunos {
        let _ = writeln!(out, "\tId: {}", aluno.id);
        let _ = writeln!(out, "\tNome: {}", aluno.nome);
        let _ = writeln!(out, "\tData de Nascimento: {}", format_date(aluno.data_nascimento));
        let _ = writeln!(out, "\tSexo: {}", aluno.sexo);
        let _ = writeln!(out, "\tTotal de faltas: {}\n", format_faltas(aluno.total_faltas));
    }
    out
}

/// Active classes with their students, grouped by `turma_id`.
pub fn turmas_ativas(turmas: &[Turma], alunos: &[Aluno]) -> String {
    let mut por_turma: HashMap<i32, Vec<Aluno>> = HashMap::new();
    for aluno in alunos {
        por_turma.entry(aluno.turma_id).or_default().push(aluno.clone());
    }

    let mut body = String::new();
    for turma in turmas.iter().filter(|t| t.is_active()) {
        let enrolled = por_turma.get(&turma.id).map(Vec::as_slice).unwrap_or(&[]);
        let _ = writeln!(body, "{}", turma_block(turma, enrolled));
    }
    if body.is_empty() {
        let _ = writeln!(body, "{}", SEM_TURMAS_ATIVAS);
    }
    format!("{}{}", TURMAS_ATIVAS_HEADER, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> Aluno {
        Aluno {
            id: 7,
            nome: "Ana".into(),
            data_nascimento: NaiveDate::from_ymd_opt(2005, 1, 1).unwrap(),
            sexo: 'F',
            total_faltas: Some(3),
            turma_id: 1,
        }
    }

    fn turma(id: i32, nome: &str, ativo: Option<bool>) -> Turma {
        Turma { id, nome: nome.into(), ativo }
    }

    #[test]
    fn aluno_block_lists_every_field() {
        let text = aluno_block(&ana());
        assert_eq!(
            text,
            "Id do aluno: 7\nNome: Ana\nData de Nascimento: 01/01/2005\nSexo: F\nTotal de faltas: 3\nId da turma: 1\n"
        );
    }

    #[test]
    fn unset_faltas_render_empty() {
        let aluno = Aluno { total_faltas: None, ..ana() };
        assert!(aluno_block(&aluno).contains("Total de faltas: \n"));
    }

    #[test]
    fn detail_appends_class_status() {
        let text = aluno_detail(&ana(), &turma(1, "1A", None));
        assert!(text.ends_with("Turma: 1A (Status: inativa)"));
    }

    #[test]
    fn alunos_ativos_filters_by_class_flag() {
        let turmas = HashMap::from([(1, turma(1, "1A", Some(true))), (2, turma(2, "2B", Some(false)))]);
        let bruno = Aluno { id: 8, nome: "Bruno".into(), turma_id: 2, ..ana() };
        let text = alunos_ativos(&[ana(), bruno], &turmas);

        assert!(text.starts_with(ALUNOS_ATIVOS_HEADER));
        assert!(text.contains("Nome: Ana"));
        assert!(text.contains("Turma: 1A\n\n"));
        assert!(!text.contains("Bruno"));
    }

    #[test]
    fn alunos_ativos_placeholder_when_no_active_class() {
        let turmas = HashMap::from([(1, turma(1, "1A", None))]);
        let text = alunos_ativos(&[ana()], &turmas);
        assert_eq!(text, format!("{}{}", ALUNOS_ATIVOS_HEADER, SEM_TURMAS_ATIVAS));
    }

    #[test]
    fn turma_block_without_students() {
        let text = turma_block(&turma(3, "3C", Some(true)), &[]);
        assert_eq!(
            text,
            "Turma: 3C\nId: 3\nStatus: ativa\nAlunos matriculados:\n\tNão há nenhum aluno matriculado nesta turma.\n"
        );
    }

    #[test]
    fn turma_block_nests_students() {
        let text = turma_block(&turma(1, "1A", Some(true)), &[ana()]);
        assert!(text.contains("\tId: 7\n\tNome: Ana\n\tData de Nascimento: 01/01/2005\n\tSexo: F\n\tTotal de faltas: 3\n\n"));
    }

    #[test]
    fn turmas_ativas_groups_students_per_class() {
        let turmas = vec![turma(1, "1A", Some(true)), turma(2, "2B", Some(true)), turma(3, "3C", Some(false))];
        let bruno = Aluno { id: 8, nome: "Bruno".into(), turma_id: 2, ..ana() };
        let text = turmas_ativas(&turmas, &[ana(), bruno]);

        let first = text.find("Turma: 1A").unwrap();
        let second = text.find("Turma: 2B").unwrap();
        assert!(first < second);
        assert!(text[first..second].contains("Ana"));
        assert!(text[second..].contains("Bruno"));
        assert!(!text.contains("3C"));
    }

    #[test]
    fn turmas_ativas_placeholder() {
        let text = turmas_ativas(&[turma(1, "1A", Some(false))], &[]);
        assert_eq!(text, format!("{}{}\n", TURMAS_ATIVAS_HEADER, SEM_TURMAS_ATIVAS));
    }
}
