use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Read, Write},
    path::Path,
};

use log::debug;

use crate::{
    error::{Error, Result},
    types::{Formula, Lit, Solution},
};

fn parse_error(line: usize, message: impl Into<String>) -> Error {
    Error::Parse {
        line,
        message: message.into(),
    }
}

fn parse_header(line_no: usize, line: &str) -> Result<(usize, usize)> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts[..] {
        ["p", "cnf", vars, clauses] => {
            let vars = vars
                .parse::<usize>()
                .map_err(|_| parse_error(line_no, format!("bad variable count '{vars}'")))?;
            let clauses = clauses
                .parse::<usize>()
                .map_err(|_| parse_error(line_no, format!("bad clause count '{clauses}'")))?;
            Ok((vars, clauses))
        }
        _ => Err(parse_error(line_no, "expected 'p cnf <vars> <clauses>'")),
    }
}

/// Reads a DIMACS CNF formula. Clauses may span lines; a `%` line ends the
/// input (as in the SATLIB benchmark files).
pub fn read_formula(reader: &mut impl Read) -> Result<Formula> {
    let mut lines = BufReader::new(reader).lines().enumerate();

    let (var_count, clause_count) = loop {
        let Some((i, line)) = lines.next() else {
            return Err(parse_error(0, "missing problem line"));
        };
        let line = line?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('c') {
            // comment line
            continue;
        }

        break parse_header(i + 1, line)?;
    };

    let mut clauses = Vec::with_capacity(clause_count);
    let mut clause = vec![];
    let mut last_line = 0;

    for (i, line) in lines {
        let line = line?;
        let line = line.trim();
        last_line = i + 1;

        if line.starts_with('%') {
            break;
        }
        if line.starts_with('c') {
            continue;
        }

        for word in line.split_whitespace() {
            let lit = word
                .parse::<Lit>()
                .map_err(|_| parse_error(last_line, format!("bad literal '{word}'")))?;
            match lit {
                0 => clauses.push(std::mem::take(&mut clause)),
                _ if lit.unsigned_abs() as usize > var_count => {
                    return Err(parse_error(
                        last_line,
                        format!("literal {lit} exceeds {var_count} variables"),
                    ));
                }
                _ => clause.push(lit),
            }
        }
    }

    if !clause.is_empty() {
        return Err(parse_error(last_line, "last clause is not terminated by 0"));
    }
    if clauses.len() != clause_count {
        return Err(parse_error(
            last_line,
            format!("expected {clause_count} clauses, found {}", clauses.len()),
        ));
    }

    let formula = Formula { var_count, clauses };
    debug!(
        "read {var_count} variables, {clause_count} clauses and {} literals",
        formula.literal_count()
    );
    Ok(formula)
}

pub fn read_formula_file(path: &Path) -> Result<Formula> {
    let mut file = File::open(path)?;
    read_formula(&mut file)
}

/// Writes `solution` in the SAT competition output format. Free variables
/// are reported as true.
pub fn write_solution(writer: &mut impl Write, var_count: usize, solution: &Solution) -> Result<()> {
    let mut writer = BufWriter::new(writer);

    let solution_str = match solution {
        Solution::Sat { .. } => "SATISFIABLE",
        Solution::Unsat => "UNSATISFIABLE",
    };
    writeln!(writer, "s {solution_str}")?;

    if let Solution::Sat { model } = solution {
        const PER_LINE: usize = 10;
        for chunk in model.to_list(var_count).chunks(PER_LINE) {
            let chunk_str = chunk
                .iter()
                .fold(String::new(), |str, lit| str + &lit.to_string() + " ");
            writeln!(writer, "v {chunk_str}")?;
        }
        writeln!(writer, "v 0")?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes a model count in the model counting competition format.
pub fn write_count(writer: &mut impl Write, count: u128) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    let status = if count > 0 { "SATISFIABLE" } else { "UNSATISFIABLE" };
    writeln!(writer, "s {status}")?;
    writeln!(writer, "s mc {count}")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{read_formula, write_count, write_solution};
    use crate::{
        error::Error,
        types::{Formula, Model, Solution},
    };

    #[test]
    fn basic() {
        let input = b"c whatever\np cnf 2 2\n1 2 0\n1 -2 0";
        let Formula { var_count, clauses } = read_formula(&mut input.as_slice()).unwrap();
        assert_eq!(var_count, 2);
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0], vec![1, 2]);
        assert_eq!(clauses[1], vec![1, -2]);
    }

    #[test]
    fn split() {
        let input = b"c whatever\np cnf 1 1\n1 1\n-1 -1 0";
        let Formula { clauses, .. } = read_formula(&mut input.as_slice()).unwrap();
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0], vec![1, 1, -1, -1]);
    }

    #[test]
    fn satlib_trailer() {
        let input = b"c uf\np cnf  3 2 \n 1 -3 0\n2 3 -1 0\n%\n0\n\n";
        let formula = read_formula(&mut input.as_slice()).unwrap();
        assert_eq!(formula.clauses, vec![vec![1, -3], vec![2, 3, -1]]);
    }

    #[test]
    fn indented_comments() {
        let input = b"p cnf 2 2\n  c indented comment\n1 2 0\n\tc tab\n -1 0\n  %\n";
        let formula = read_formula(&mut input.as_slice()).unwrap();
        assert_eq!(formula.clauses, vec![vec![1, 2], vec![-1]]);
        assert_eq!(formula.literal_count(), 3);
    }

    #[test]
    fn empty_clause() {
        let input = b"p cnf 1 2\n1 0\n0\n";
        let formula = read_formula(&mut input.as_slice()).unwrap();
        assert_eq!(formula.clauses, vec![vec![1], vec![]]);
    }

    #[test]
    fn malformed() {
        let cases: [&[u8]; 6] = [
            b"c no header\n",
            b"p dnf 1 1\n1 0\n",
            b"p cnf 2 1\n1 x 0\n",
            b"p cnf 2 1\n1 3 0\n",
            b"p cnf 2 2\n1 2 0\n",
            b"p cnf 2 1\n1 2\n",
        ];
        for input in cases {
            let result = read_formula(&mut &input[..]);
            assert!(matches!(result, Err(Error::Parse { .. })), "{input:?}");
        }
    }

    #[test]
    fn solution_output() {
        let model: Model = [-2].into_iter().collect();
        let mut buf: Vec<u8> = vec![];
        write_solution(&mut buf, 3, &Solution::Sat { model }).unwrap();
        let str = std::str::from_utf8(&buf).unwrap();
        assert_eq!(str, "s SATISFIABLE\nv 1 -2 3 \nv 0\n");

        let mut buf: Vec<u8> = vec![];
        write_solution(&mut buf, 3, &Solution::Unsat).unwrap();
        assert_eq!(buf, b"s UNSATISFIABLE\n");
    }

    #[test]
    fn count_output() {
        let mut buf: Vec<u8> = vec![];
        write_count(&mut buf, 12).unwrap();
        assert_eq!(buf, b"s SATISFIABLE\ns mc 12\n");
    }
}
