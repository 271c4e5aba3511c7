use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing::{debug, error, info, instrument};

use crate::error::Result;

pub static DELETE_QUESTION: &str = "是否删除已下载的图片? (yes/no): ";

/// 向操作者确认一件事，回答是否为肯定
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, question: &str) -> Result<bool> {
        Ok(self(question))
    }
}

/// 从标准输入读取一行，阻塞直到输入结束
pub struct ConsoleConfirm;

impl Confirm for ConsoleConfirm {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        print!("{}", question);
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        debug!("用户输入: {}", answer.trim());
        Ok(answer_is_yes(&answer))
    }
}

/// 只有 "yes"(忽略大小写和首尾空白)算确认
pub fn answer_is_yes(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("yes")
}

/// 询问是否删除下载的页面图片，确认后只删除列表中的文件
///
/// 返回是否执行了删除。单个文件删除失败只记录日志。
#[instrument(skip_all, fields(images = image_files.len()))]
pub fn cleanup_images<C: Confirm>(confirm: &mut C, image_files: &[PathBuf]) -> Result<bool> {
    if !confirm.confirm(DELETE_QUESTION)? {
        info!("图片已保留");
        return Ok(false);
    }

    let mut removed = 0;
    for image in image_files {
        match fs::remove_file(image) {
            Ok(()) => removed += 1,
            Err(e) => error!("删除文件失败 {}: {}", image.display(), e),
        }
    }
    info!("已删除下载的图片: {}/{}", removed, image_files.len());
    Ok(true)
}
